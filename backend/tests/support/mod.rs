//! In-memory port doubles backing the HTTP surface tests.
//!
//! One shared [`Store`] holds every table so referential checks (delete
//! restrictions, numbering scopes) behave like the real schema without a
//! database.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use backend::domain::ports::{
    Clock, DeleteOutcome, DoctorRepository, IdentityError, PasswordHasher, PatientRepository,
    PersistenceError, PriorityRepository, RoomRepository, ServiceRepository,
    TicketPersistenceError, TicketRepository, UserRepository,
};
use backend::domain::{
    CredentialRecord, Doctor, IdentityNumber, NewDoctor, NewPatient, NewPriority, NewRoom,
    NewService, NewTicket, NewUser, NumberingScope, Patient, Priority, Room, Service, Ticket,
    TicketNumbering, TicketService, User, next_number,
};
use backend::inbound::http::AppState;
use backend::outbound::broadcast::TicketBroadcaster;
use backend::outbound::security::JwtTokenCodec;

/// Signing secret shared by the test codec and assertions.
pub const TEST_SECRET: &str = "secreto-de-prueba-suficientemente-largo";

/// The fixed instant every test request runs at.
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 10)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

/// Shared in-memory tables.
#[derive(Default)]
pub struct Store {
    pub users: Mutex<Vec<(User, String)>>,
    pub patients: Mutex<Vec<Patient>>,
    pub doctors: Mutex<Vec<Doctor>>,
    pub services: Mutex<Vec<Service>>,
    pub priorities: Mutex<Vec<Priority>>,
    pub rooms: Mutex<Vec<Room>>,
    pub tickets: Mutex<Vec<Ticket>>,
    next_id: AtomicI32,
}

impl Store {
    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Seed a service directly, bypassing the HTTP surface.
    pub fn seed_service(&self, nombre: &str, letra: &str, numero_inicial: i32) -> Service {
        let service = Service {
            id: self.next_id(),
            nombre: nombre.to_owned(),
            letra: letra.to_owned(),
            numero_inicial,
        };
        self.services.lock().expect("lock").push(service.clone());
        service
    }

    /// Seed a patient directly, bypassing the HTTP surface.
    pub fn seed_patient(&self, identidad: &str) -> Patient {
        let patient = Patient {
            id: self.next_id(),
            identidad: IdentityNumber::new(identidad).expect("valid identity"),
            nombres: "Ana".to_owned(),
            apellidos: "Pérez".to_owned(),
            fecha_registro: test_now(),
        };
        self.patients.lock().expect("lock").push(patient.clone());
        patient
    }

    /// Seed a ticket directly with an explicit timestamp.
    pub fn seed_ticket(&self, servicio_id: i32, numero: i32, at: NaiveDateTime) -> Ticket {
        let ticket = Ticket {
            id: self.next_id(),
            numero_ticket: numero,
            paciente_id: 1,
            servicio_id,
            prioridad_id: 1,
            estado: "pendiente".to_owned(),
            fecha_hora: at,
        };
        self.tickets.lock().expect("lock").push(ticket.clone());
        ticket
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        test_now()
    }
}

/// Deterministic stand-in for bcrypt.
pub struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, raw: &str) -> Result<String, IdentityError> {
        Ok(format!("hashed:{raw}"))
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, IdentityError> {
        Ok(hash == format!("hashed:{raw}"))
    }
}

struct InMemoryUsers(Arc<Store>);

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn list(&self) -> Result<Vec<User>, PersistenceError> {
        let users = self.0.users.lock().expect("lock");
        Ok(users.iter().rev().map(|(user, _)| user.clone()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PersistenceError> {
        let users = self.0.users.lock().expect("lock");
        Ok(users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_by_username_or_email(
        &self,
        usuario: &str,
        correo: &str,
    ) -> Result<Option<User>, PersistenceError> {
        let users = self.0.users.lock().expect("lock");
        Ok(users
            .iter()
            .find(|(user, _)| user.usuario == usuario || user.correo == correo)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        correo: &str,
    ) -> Result<Option<CredentialRecord>, PersistenceError> {
        let users = self.0.users.lock().expect("lock");
        Ok(users
            .iter()
            .find(|(user, _)| user.correo == correo)
            .map(|(user, hash)| CredentialRecord {
                user: user.clone(),
                contrasena: hash.clone(),
            }))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, PersistenceError> {
        let user = User {
            id: self.0.next_id(),
            usuario: new_user.usuario,
            correo: new_user.correo.into(),
            rol: new_user.rol,
        };
        self.0
            .users
            .lock()
            .expect("lock")
            .push((user.clone(), new_user.contrasena));
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let referenced = self
            .0
            .doctors
            .lock()
            .expect("lock")
            .iter()
            .any(|d| d.usuario_id == id);
        if referenced {
            return Ok(DeleteOutcome::Restricted);
        }
        let mut users = self.0.users.lock().expect("lock");
        let before = users.len();
        users.retain(|(user, _)| user.id != id);
        Ok(if users.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

struct InMemoryPatients(Arc<Store>);

#[async_trait]
impl PatientRepository for InMemoryPatients {
    async fn list(&self) -> Result<Vec<Patient>, PersistenceError> {
        let patients = self.0.patients.lock().expect("lock");
        Ok(patients.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Patient>, PersistenceError> {
        let patients = self.0.patients.lock().expect("lock");
        Ok(patients.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_identity(
        &self,
        identidad: &IdentityNumber,
    ) -> Result<Option<Patient>, PersistenceError> {
        let patients = self.0.patients.lock().expect("lock");
        Ok(patients.iter().find(|p| p.identidad == *identidad).cloned())
    }

    async fn insert(&self, new_patient: NewPatient) -> Result<Patient, PersistenceError> {
        let patient = Patient {
            id: self.0.next_id(),
            identidad: new_patient.identidad,
            nombres: new_patient.nombres,
            apellidos: new_patient.apellidos,
            fecha_registro: test_now(),
        };
        self.0
            .patients
            .lock()
            .expect("lock")
            .push(patient.clone());
        Ok(patient)
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let referenced = self
            .0
            .tickets
            .lock()
            .expect("lock")
            .iter()
            .any(|t| t.paciente_id == id);
        if referenced {
            return Ok(DeleteOutcome::Restricted);
        }
        let mut patients = self.0.patients.lock().expect("lock");
        let before = patients.len();
        patients.retain(|p| p.id != id);
        Ok(if patients.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

struct InMemoryDoctors(Arc<Store>);

#[async_trait]
impl DoctorRepository for InMemoryDoctors {
    async fn list(&self) -> Result<Vec<Doctor>, PersistenceError> {
        let doctors = self.0.doctors.lock().expect("lock");
        Ok(doctors.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Doctor>, PersistenceError> {
        let doctors = self.0.doctors.lock().expect("lock");
        Ok(doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn insert(&self, new_doctor: NewDoctor) -> Result<Doctor, PersistenceError> {
        let doctor = Doctor {
            id: self.0.next_id(),
            nombre: new_doctor.nombre,
            apellido: new_doctor.apellido,
            profesion: new_doctor.profesion,
            usuario_id: new_doctor.usuario_id,
        };
        self.0.doctors.lock().expect("lock").push(doctor.clone());
        Ok(doctor)
    }

    async fn update(
        &self,
        id: i32,
        doctor: NewDoctor,
    ) -> Result<Option<Doctor>, PersistenceError> {
        let mut doctors = self.0.doctors.lock().expect("lock");
        let Some(existing) = doctors.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        existing.nombre = doctor.nombre;
        existing.apellido = doctor.apellido;
        existing.profesion = doctor.profesion;
        existing.usuario_id = doctor.usuario_id;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let referenced = self
            .0
            .rooms
            .lock()
            .expect("lock")
            .iter()
            .any(|r| r.medico_id == id);
        if referenced {
            return Ok(DeleteOutcome::Restricted);
        }
        let mut doctors = self.0.doctors.lock().expect("lock");
        let before = doctors.len();
        doctors.retain(|d| d.id != id);
        Ok(if doctors.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

struct InMemoryServices(Arc<Store>);

#[async_trait]
impl ServiceRepository for InMemoryServices {
    async fn list(&self) -> Result<Vec<Service>, PersistenceError> {
        let services = self.0.services.lock().expect("lock");
        Ok(services.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Service>, PersistenceError> {
        let services = self.0.services.lock().expect("lock");
        Ok(services.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, new_service: NewService) -> Result<Service, PersistenceError> {
        let service = Service {
            id: self.0.next_id(),
            nombre: new_service.nombre,
            letra: new_service.letra,
            numero_inicial: new_service.numero_inicial,
        };
        self.0.services.lock().expect("lock").push(service.clone());
        Ok(service)
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let ticket_ref = self
            .0
            .tickets
            .lock()
            .expect("lock")
            .iter()
            .any(|t| t.servicio_id == id);
        let room_ref = self
            .0
            .rooms
            .lock()
            .expect("lock")
            .iter()
            .any(|r| r.servicio_id == id);
        if ticket_ref || room_ref {
            return Ok(DeleteOutcome::Restricted);
        }
        let mut services = self.0.services.lock().expect("lock");
        let before = services.len();
        services.retain(|s| s.id != id);
        Ok(if services.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

struct InMemoryPriorities(Arc<Store>);

#[async_trait]
impl PriorityRepository for InMemoryPriorities {
    async fn list(&self) -> Result<Vec<Priority>, PersistenceError> {
        let priorities = self.0.priorities.lock().expect("lock");
        Ok(priorities.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Priority>, PersistenceError> {
        let priorities = self.0.priorities.lock().expect("lock");
        Ok(priorities.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name(
        &self,
        nombre: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Priority>, PersistenceError> {
        let priorities = self.0.priorities.lock().expect("lock");
        Ok(priorities
            .iter()
            .find(|p| p.nombre == nombre && Some(p.id) != exclude_id)
            .cloned())
    }

    async fn insert(&self, new_priority: NewPriority) -> Result<Priority, PersistenceError> {
        let priority = Priority {
            id: self.0.next_id(),
            nombre: new_priority.nombre,
            nivel_prioridad: new_priority.nivel_prioridad,
        };
        self.0
            .priorities
            .lock()
            .expect("lock")
            .push(priority.clone());
        Ok(priority)
    }

    async fn update(
        &self,
        id: i32,
        priority: NewPriority,
    ) -> Result<Option<Priority>, PersistenceError> {
        let mut priorities = self.0.priorities.lock().expect("lock");
        let Some(existing) = priorities.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        existing.nombre = priority.nombre;
        existing.nivel_prioridad = priority.nivel_prioridad;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let referenced = self
            .0
            .tickets
            .lock()
            .expect("lock")
            .iter()
            .any(|t| t.prioridad_id == id);
        if referenced {
            return Ok(DeleteOutcome::Restricted);
        }
        let mut priorities = self.0.priorities.lock().expect("lock");
        let before = priorities.len();
        priorities.retain(|p| p.id != id);
        Ok(if priorities.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

struct InMemoryRooms(Arc<Store>);

#[async_trait]
impl RoomRepository for InMemoryRooms {
    async fn list(&self) -> Result<Vec<Room>, PersistenceError> {
        let mut rooms: Vec<Room> = self.0.rooms.lock().expect("lock").clone();
        rooms.sort_by_key(|r| r.numero);
        Ok(rooms)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Room>, PersistenceError> {
        let rooms = self.0.rooms.lock().expect("lock");
        Ok(rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_tuple(&self, room: NewRoom) -> Result<Option<Room>, PersistenceError> {
        let rooms = self.0.rooms.lock().expect("lock");
        Ok(rooms
            .iter()
            .find(|r| {
                r.numero == room.numero
                    && r.servicio_id == room.servicio_id
                    && r.medico_id == room.medico_id
            })
            .cloned())
    }

    async fn insert(&self, new_room: NewRoom) -> Result<Room, PersistenceError> {
        let room = Room {
            id: self.0.next_id(),
            numero: new_room.numero,
            servicio_id: new_room.servicio_id,
            medico_id: new_room.medico_id,
        };
        self.0.rooms.lock().expect("lock").push(room.clone());
        Ok(room)
    }

    async fn update(&self, id: i32, room: NewRoom) -> Result<Option<Room>, PersistenceError> {
        let mut rooms = self.0.rooms.lock().expect("lock");
        let Some(existing) = rooms.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        existing.numero = room.numero;
        existing.servicio_id = room.servicio_id;
        existing.medico_id = room.medico_id;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError> {
        let mut rooms = self.0.rooms.lock().expect("lock");
        let before = rooms.len();
        rooms.retain(|r| r.id != id);
        Ok(if rooms.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

struct InMemoryTickets(Arc<Store>);

#[async_trait]
impl TicketRepository for InMemoryTickets {
    async fn list(&self) -> Result<Vec<Ticket>, TicketPersistenceError> {
        let mut tickets: Vec<Ticket> = self.0.tickets.lock().expect("lock").clone();
        tickets.sort_by(|a, b| b.fecha_hora.cmp(&a.fecha_hora));
        Ok(tickets)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, TicketPersistenceError> {
        let tickets = self.0.tickets.lock().expect("lock");
        Ok(tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_numbered(
        &self,
        ticket: NewTicket,
        numbering: TicketNumbering,
    ) -> Result<Ticket, TicketPersistenceError> {
        let mut tickets = self.0.tickets.lock().expect("lock");
        let current_max = tickets
            .iter()
            .filter(|t| t.servicio_id == ticket.servicio_id)
            .filter(|t| match numbering.scope {
                NumberingScope::AllTime => true,
                NumberingScope::CalendarDay(day) => t.fecha_hora.date() == day,
            })
            .map(|t| t.numero_ticket)
            .max();
        let stored = Ticket {
            id: self.0.next_id(),
            numero_ticket: next_number(current_max, numbering.fallback),
            paciente_id: ticket.paciente_id,
            servicio_id: ticket.servicio_id,
            prioridad_id: ticket.prioridad_id,
            estado: ticket.estado,
            fecha_hora: test_now(),
        };
        tickets.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(
        &self,
        id: i32,
        estado: &str,
    ) -> Result<Option<Ticket>, TicketPersistenceError> {
        let mut tickets = self.0.tickets.lock().expect("lock");
        let Some(ticket) = tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        ticket.estado = estado.to_owned();
        Ok(Some(ticket.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, TicketPersistenceError> {
        let mut tickets = self.0.tickets.lock().expect("lock");
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        Ok(tickets.len() < before)
    }
}

/// Build an [`AppState`] over the in-memory store.
///
/// Returns the store for seeding and the broadcaster for event assertions.
pub fn test_state() -> (AppState, Arc<Store>, TicketBroadcaster) {
    let store = Arc::new(Store::default());
    let broadcaster = TicketBroadcaster::new();

    let patients = Arc::new(InMemoryPatients(store.clone()));
    let services = Arc::new(InMemoryServices(store.clone()));
    let tickets = TicketService::new(
        Arc::new(InMemoryTickets(store.clone())),
        patients.clone(),
        services.clone(),
        Arc::new(broadcaster.clone()),
        Arc::new(FixedClock),
    );

    let state = AppState {
        users: Arc::new(InMemoryUsers(store.clone())),
        patients,
        doctors: Arc::new(InMemoryDoctors(store.clone())),
        services,
        priorities: Arc::new(InMemoryPriorities(store.clone())),
        rooms: Arc::new(InMemoryRooms(store.clone())),
        tickets,
        hasher: Arc::new(FakeHasher),
        tokens: Arc::new(JwtTokenCodec::new(TEST_SECRET)),
    };
    (state, store, broadcaster)
}
