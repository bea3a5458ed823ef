//! Row models bridging the Diesel schema and the domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ports::PersistenceError;
use crate::domain::{
    CredentialRecord, Doctor, IdentityNumber, NewDoctor, NewPatient, NewPriority, NewRoom,
    NewService, NewTicket, NewUser, Patient, Priority, Room, Service, Ticket, User,
};

use super::schema::{consultorios, medicos, pacientes, prioridades, servicios, tickets, usuarios};

/// Stored user account row, including the password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub usuario: String,
    pub correo: String,
    pub contrasena: String,
    pub rol: String,
}

impl UserRow {
    /// Safe account view, leaving the hash behind.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            usuario: self.usuario,
            correo: self.correo,
            rol: self.rol,
        }
    }

    /// Account plus hash, for login verification.
    pub fn into_credentials(self) -> CredentialRecord {
        let contrasena = self.contrasena.clone();
        CredentialRecord {
            user: self.into_user(),
            contrasena,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usuarios)]
pub struct NewUserRow {
    pub usuario: String,
    pub correo: String,
    pub contrasena: String,
    pub rol: String,
}

impl From<NewUser> for NewUserRow {
    fn from(value: NewUser) -> Self {
        Self {
            usuario: value.usuario,
            correo: value.correo.into(),
            contrasena: value.contrasena,
            rol: value.rol,
        }
    }
}

/// Stored patient row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pacientes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PatientRow {
    pub id: i32,
    pub identidad: String,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_registro: NaiveDateTime,
}

impl PatientRow {
    /// Convert to the domain type; a malformed stored identity is data
    /// corruption and surfaces as a query error.
    pub fn into_domain(self) -> Result<Patient, PersistenceError> {
        let identidad = IdentityNumber::new(self.identidad)
            .map_err(|_| PersistenceError::query("stored identity number is malformed"))?;
        Ok(Patient {
            id: self.id,
            identidad,
            nombres: self.nombres,
            apellidos: self.apellidos,
            fecha_registro: self.fecha_registro,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pacientes)]
pub struct NewPatientRow {
    pub identidad: String,
    pub nombres: String,
    pub apellidos: String,
}

impl From<NewPatient> for NewPatientRow {
    fn from(value: NewPatient) -> Self {
        Self {
            identidad: value.identidad.into(),
            nombres: value.nombres,
            apellidos: value.apellidos,
        }
    }
}

/// Stored doctor row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = medicos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DoctorRow {
    pub id: i32,
    pub nombre: String,
    pub apellido: String,
    pub profesion: String,
    pub usuario_id: i32,
}

impl DoctorRow {
    pub fn into_domain(self) -> Doctor {
        Doctor {
            id: self.id,
            nombre: self.nombre,
            apellido: self.apellido,
            profesion: self.profesion,
            usuario_id: self.usuario_id,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = medicos)]
pub struct NewDoctorRow {
    pub nombre: String,
    pub apellido: String,
    pub profesion: String,
    pub usuario_id: i32,
}

impl From<NewDoctor> for NewDoctorRow {
    fn from(value: NewDoctor) -> Self {
        Self {
            nombre: value.nombre,
            apellido: value.apellido,
            profesion: value.profesion,
            usuario_id: value.usuario_id,
        }
    }
}

/// Stored service row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = servicios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: i32,
    pub nombre: String,
    pub letra: String,
    pub numero_inicial: i32,
}

impl ServiceRow {
    pub fn into_domain(self) -> Service {
        Service {
            id: self.id,
            nombre: self.nombre,
            letra: self.letra,
            numero_inicial: self.numero_inicial,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = servicios)]
pub struct NewServiceRow {
    pub nombre: String,
    pub letra: String,
    pub numero_inicial: i32,
}

impl From<NewService> for NewServiceRow {
    fn from(value: NewService) -> Self {
        Self {
            nombre: value.nombre,
            letra: value.letra,
            numero_inicial: value.numero_inicial,
        }
    }
}

/// Stored room row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = consultorios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoomRow {
    pub id: i32,
    pub numero: i32,
    pub servicio_id: i32,
    pub medico_id: i32,
}

impl RoomRow {
    pub fn into_domain(self) -> Room {
        Room {
            id: self.id,
            numero: self.numero,
            servicio_id: self.servicio_id,
            medico_id: self.medico_id,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = consultorios)]
pub struct NewRoomRow {
    pub numero: i32,
    pub servicio_id: i32,
    pub medico_id: i32,
}

impl From<NewRoom> for NewRoomRow {
    fn from(value: NewRoom) -> Self {
        Self {
            numero: value.numero,
            servicio_id: value.servicio_id,
            medico_id: value.medico_id,
        }
    }
}

/// Stored priority row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = prioridades)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PriorityRow {
    pub id: i32,
    pub nombre: String,
    pub nivel_prioridad: i32,
}

impl PriorityRow {
    pub fn into_domain(self) -> Priority {
        Priority {
            id: self.id,
            nombre: self.nombre,
            nivel_prioridad: self.nivel_prioridad,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = prioridades)]
pub struct NewPriorityRow {
    pub nombre: String,
    pub nivel_prioridad: i32,
}

impl From<NewPriority> for NewPriorityRow {
    fn from(value: NewPriority) -> Self {
        Self {
            nombre: value.nombre,
            nivel_prioridad: value.nivel_prioridad,
        }
    }
}

/// Stored ticket row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TicketRow {
    pub id: i32,
    pub numero_ticket: i32,
    pub paciente_id: i32,
    pub servicio_id: i32,
    pub prioridad_id: i32,
    pub estado: String,
    pub fecha_hora: NaiveDateTime,
}

impl TicketRow {
    pub fn into_domain(self) -> Ticket {
        Ticket {
            id: self.id,
            numero_ticket: self.numero_ticket,
            paciente_id: self.paciente_id,
            servicio_id: self.servicio_id,
            prioridad_id: self.prioridad_id,
            estado: self.estado,
            fecha_hora: self.fecha_hora,
        }
    }
}

/// Ticket seed; the sequence number is attached by the repository inside
/// the issuance transaction.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicketRow {
    pub paciente_id: i32,
    pub servicio_id: i32,
    pub prioridad_id: i32,
    pub estado: String,
}

impl From<NewTicket> for NewTicketRow {
    fn from(value: NewTicket) -> Self {
        Self {
            paciente_id: value.paciente_id,
            servicio_id: value.servicio_id,
            prioridad_id: value.prioridad_id,
            estado: value.estado,
        }
    }
}
