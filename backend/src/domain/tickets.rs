//! Ticket issuance engine.
//!
//! Computes the next sequence number for a service, persists the ticket,
//! and publishes the lifecycle event. The staff path numbers against the
//! service's whole history; the public kiosk path numbers against the
//! current calendar day. Numbering and insert happen atomically inside the
//! ticket repository; when concurrent issuance collides the engine retries
//! the whole computation a bounded number of times.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::events::TicketEvent;
use crate::domain::patient::IdentityNumber;
use crate::domain::ports::{
    Clock, PatientRepository, PersistenceError, ServiceRepository, TicketEventSink,
    TicketPersistenceError, TicketRepository,
};
use crate::domain::ticket::{
    ESTADO_LLAMADO, ESTADO_PENDIENTE, NewTicket, NumberingScope, PRIORIDAD_PUBLICA, PublicTicket,
    Ticket, TicketNumbering,
};

/// Attempts made when concurrent issuance keeps colliding.
const ISSUE_ATTEMPTS: u32 = 3;

/// Staff-path issuance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    /// Patient the ticket belongs to.
    pub paciente_id: i32,
    /// Service the ticket queues for.
    pub servicio_id: i32,
    /// Priority tag.
    pub prioridad_id: i32,
    /// Optional initial status; empty or absent falls back to `pendiente`.
    pub estado: Option<String>,
}

/// Ticket issuance engine wired to its ports.
#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    patients: Arc<dyn PatientRepository>,
    services: Arc<dyn ServiceRepository>,
    events: Arc<dyn TicketEventSink>,
    clock: Arc<dyn Clock>,
}

fn map_ticket_error(error: TicketPersistenceError) -> Error {
    error!(error = %error, "ticket repository failure");
    Error::internal(error.to_string())
}

fn map_registry_error(error: PersistenceError) -> Error {
    error!(error = %error, "registry lookup failure during issuance");
    Error::internal(error.to_string())
}

impl TicketService {
    /// Wire the engine to its ports.
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        patients: Arc<dyn PatientRepository>,
        services: Arc<dyn ServiceRepository>,
        events: Arc<dyn TicketEventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tickets,
            patients,
            services,
            events,
            clock,
        }
    }

    /// All tickets, most recent first.
    pub async fn list(&self) -> Result<Vec<Ticket>, Error> {
        self.tickets.list().await.map_err(map_ticket_error)
    }

    /// Fetch a single ticket.
    pub async fn get(&self, id: i32) -> Result<Ticket, Error> {
        self.tickets
            .find_by_id(id)
            .await
            .map_err(map_ticket_error)?
            .ok_or_else(|| Error::not_found("Ticket no encontrado"))
    }

    /// Issue a ticket through the staff path.
    ///
    /// The new number is one past the all-time maximum for the service, or
    /// the service's `numero_inicial` when no ticket exists yet.
    pub async fn issue(&self, request: IssueRequest) -> Result<Ticket, Error> {
        let service = self
            .services
            .find_by_id(request.servicio_id)
            .await
            .map_err(map_registry_error)?
            .ok_or_else(|| Error::invalid_request("El servicio no existe"))?;

        self.patients
            .find_by_id(request.paciente_id)
            .await
            .map_err(map_registry_error)?
            .ok_or_else(|| Error::invalid_request("El paciente no existe"))?;

        let estado = match request.estado {
            Some(estado) if !estado.trim().is_empty() => estado,
            _ => ESTADO_PENDIENTE.to_owned(),
        };

        let seed = NewTicket {
            paciente_id: request.paciente_id,
            servicio_id: request.servicio_id,
            prioridad_id: request.prioridad_id,
            estado,
        };
        let numbering = TicketNumbering {
            scope: NumberingScope::AllTime,
            fallback: service.numero_inicial,
        };

        let ticket = self.insert_with_retry(seed, numbering).await?;
        self.events.publish(TicketEvent::Issued(ticket.clone())).await;
        Ok(ticket)
    }

    /// Issue a ticket from the public kiosk.
    ///
    /// Resolves the patient by identity number, fixes the priority and
    /// status, and numbers against the current calendar day only, falling
    /// back to `numero_inicial + 1` on an empty day.
    pub async fn issue_public(
        &self,
        identidad: &IdentityNumber,
        servicio_id: i32,
    ) -> Result<PublicTicket, Error> {
        let patient = self
            .patients
            .find_by_identity(identidad)
            .await
            .map_err(map_registry_error)?
            .ok_or_else(|| Error::not_found("Paciente no encontrado"))?;

        let service = self
            .services
            .find_by_id(servicio_id)
            .await
            .map_err(map_registry_error)?
            .ok_or_else(|| Error::not_found("Servicio no encontrado"))?;

        let seed = NewTicket {
            paciente_id: patient.id,
            servicio_id,
            prioridad_id: PRIORIDAD_PUBLICA,
            estado: ESTADO_PENDIENTE.to_owned(),
        };
        let numbering = TicketNumbering {
            scope: NumberingScope::CalendarDay(self.clock.today()),
            fallback: service.numero_inicial + 1,
        };

        let ticket = self.insert_with_retry(seed, numbering).await?;

        let now = self.clock.now();
        let public = PublicTicket {
            ticket,
            letra: service.letra.clone(),
            paciente: patient,
            servicio: service,
            fecha: now.format("%d/%m/%Y").to_string(),
            hora: now.format("%H:%M:%S").to_string(),
        };
        self.events
            .publish(TicketEvent::IssuedPublic(public.clone()))
            .await;
        Ok(public)
    }

    /// Overwrite a ticket's status with a caller-supplied value.
    pub async fn set_status(&self, id: i32, estado: &str) -> Result<Ticket, Error> {
        if estado.trim().is_empty() {
            return Err(Error::invalid_request("El estado es obligatorio"));
        }
        let ticket = self
            .tickets
            .update_status(id, estado)
            .await
            .map_err(map_ticket_error)?
            .ok_or_else(|| Error::not_found("Ticket no encontrado"))?;
        self.events
            .publish(TicketEvent::StatusUpdated(ticket.clone()))
            .await;
        Ok(ticket)
    }

    /// Call a ticket to a room: status becomes `llamado`.
    pub async fn call(&self, id: i32) -> Result<Ticket, Error> {
        let ticket = self
            .tickets
            .update_status(id, ESTADO_LLAMADO)
            .await
            .map_err(map_ticket_error)?
            .ok_or_else(|| Error::not_found("Ticket no encontrado"))?;
        self.events
            .publish(TicketEvent::Called(ticket.clone()))
            .await;
        Ok(ticket)
    }

    /// Delete a ticket.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        let deleted = self.tickets.delete(id).await.map_err(map_ticket_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("Ticket no encontrado"))
        }
    }

    async fn insert_with_retry(
        &self,
        seed: NewTicket,
        numbering: TicketNumbering,
    ) -> Result<Ticket, Error> {
        let mut attempt = 1;
        loop {
            match self
                .tickets
                .insert_numbered(seed.clone(), numbering)
                .await
            {
                Ok(ticket) => return Ok(ticket),
                Err(TicketPersistenceError::Conflict {}) if attempt < ISSUE_ATTEMPTS => {
                    warn!(attempt, servicio_id = seed.servicio_id, "issuance conflict, retrying");
                    attempt += 1;
                }
                Err(error) => return Err(map_ticket_error(error)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Numbering, retry, and event coverage with stub ports.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::patient::{NewPatient, Patient};
    use crate::domain::ports::DeleteOutcome;
    use crate::domain::service::{NewService, Service};
    use crate::domain::ticket::next_number;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid timestamp")
    }

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    #[derive(Default)]
    struct StubTickets {
        stored: Mutex<Vec<Ticket>>,
        conflicts_left: Mutex<u32>,
        insert_calls: Mutex<u32>,
        now: Option<NaiveDateTime>,
    }

    impl StubTickets {
        fn stamping(now: NaiveDateTime) -> Self {
            Self {
                now: Some(now),
                ..Self::default()
            }
        }

        fn with_conflicts(self, count: u32) -> Self {
            *self.conflicts_left.lock().expect("lock") = count;
            self
        }

        fn seed(self, ticket: Ticket) -> Self {
            self.stored.lock().expect("lock").push(ticket);
            self
        }

        fn insert_calls(&self) -> u32 {
            *self.insert_calls.lock().expect("lock")
        }
    }

    #[async_trait]
    impl TicketRepository for StubTickets {
        async fn list(&self) -> Result<Vec<Ticket>, TicketPersistenceError> {
            Ok(self.stored.lock().expect("lock").clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, TicketPersistenceError> {
            Ok(self
                .stored
                .lock()
                .expect("lock")
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        async fn insert_numbered(
            &self,
            ticket: NewTicket,
            numbering: TicketNumbering,
        ) -> Result<Ticket, TicketPersistenceError> {
            *self.insert_calls.lock().expect("lock") += 1;
            {
                let mut conflicts = self.conflicts_left.lock().expect("lock");
                if *conflicts > 0 {
                    *conflicts -= 1;
                    return Err(TicketPersistenceError::conflict());
                }
            }
            let mut stored = self.stored.lock().expect("lock");
            let max = stored
                .iter()
                .filter(|t| t.servicio_id == ticket.servicio_id)
                .filter(|t| match numbering.scope {
                    NumberingScope::AllTime => true,
                    NumberingScope::CalendarDay(day) => t.fecha_hora.date() == day,
                })
                .map(|t| t.numero_ticket)
                .max();
            let id = i32::try_from(stored.len()).expect("small test set") + 1;
            let row = Ticket {
                id,
                numero_ticket: next_number(max, numbering.fallback),
                paciente_id: ticket.paciente_id,
                servicio_id: ticket.servicio_id,
                prioridad_id: ticket.prioridad_id,
                estado: ticket.estado,
                fecha_hora: self.now.unwrap_or_else(|| ts(2025, 5, 10, 9)),
            };
            stored.push(row.clone());
            Ok(row)
        }

        async fn update_status(
            &self,
            id: i32,
            estado: &str,
        ) -> Result<Option<Ticket>, TicketPersistenceError> {
            let mut stored = self.stored.lock().expect("lock");
            let Some(ticket) = stored.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            ticket.estado = estado.to_owned();
            Ok(Some(ticket.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, TicketPersistenceError> {
            let mut stored = self.stored.lock().expect("lock");
            let before = stored.len();
            stored.retain(|t| t.id != id);
            Ok(stored.len() < before)
        }
    }

    #[derive(Default)]
    struct StubPatients {
        stored: Vec<Patient>,
    }

    #[async_trait]
    impl PatientRepository for StubPatients {
        async fn list(&self) -> Result<Vec<Patient>, PersistenceError> {
            Ok(self.stored.clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Patient>, PersistenceError> {
            Ok(self.stored.iter().find(|p| p.id == id).cloned())
        }

        async fn find_by_identity(
            &self,
            identidad: &IdentityNumber,
        ) -> Result<Option<Patient>, PersistenceError> {
            Ok(self
                .stored
                .iter()
                .find(|p| p.identidad == *identidad)
                .cloned())
        }

        async fn insert(&self, _new_patient: NewPatient) -> Result<Patient, PersistenceError> {
            Err(PersistenceError::query("not used"))
        }

        async fn delete(&self, _id: i32) -> Result<DeleteOutcome, PersistenceError> {
            Ok(DeleteOutcome::NotFound)
        }
    }

    #[derive(Default)]
    struct StubServices {
        stored: Vec<Service>,
    }

    #[async_trait]
    impl ServiceRepository for StubServices {
        async fn list(&self) -> Result<Vec<Service>, PersistenceError> {
            Ok(self.stored.clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Service>, PersistenceError> {
            Ok(self.stored.iter().find(|s| s.id == id).cloned())
        }

        async fn insert(&self, _new_service: NewService) -> Result<Service, PersistenceError> {
            Err(PersistenceError::query("not used"))
        }

        async fn delete(&self, _id: i32) -> Result<DeleteOutcome, PersistenceError> {
            Ok(DeleteOutcome::NotFound)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<TicketEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<TicketEvent> {
            self.published.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl TicketEventSink for RecordingSink {
        async fn publish(&self, event: TicketEvent) {
            self.published.lock().expect("lock").push(event);
        }
    }

    fn patient(id: i32, identidad: &str) -> Patient {
        Patient {
            id,
            identidad: IdentityNumber::new(identidad).expect("valid identity"),
            nombres: "Ana".to_owned(),
            apellidos: "Pérez".to_owned(),
            fecha_registro: ts(2025, 1, 1, 8),
        }
    }

    fn pediatria() -> Service {
        Service {
            id: 2,
            nombre: "Pediatría".to_owned(),
            letra: "B".to_owned(),
            numero_inicial: 100,
        }
    }

    fn existing_ticket(id: i32, numero: i32, at: NaiveDateTime) -> Ticket {
        Ticket {
            id,
            numero_ticket: numero,
            paciente_id: 1,
            servicio_id: 2,
            prioridad_id: 1,
            estado: ESTADO_PENDIENTE.to_owned(),
            fecha_hora: at,
        }
    }

    struct Harness {
        service: TicketService,
        tickets: Arc<StubTickets>,
        sink: Arc<RecordingSink>,
    }

    fn harness(tickets: StubTickets) -> Harness {
        let tickets = Arc::new(tickets);
        let sink = Arc::new(RecordingSink::default());
        let service = TicketService::new(
            tickets.clone(),
            Arc::new(StubPatients {
                stored: vec![patient(1, "0123456789123")],
            }),
            Arc::new(StubServices {
                stored: vec![pediatria()],
            }),
            sink.clone(),
            Arc::new(FixedClock(ts(2025, 5, 10, 9))),
        );
        Harness {
            service,
            tickets,
            sink,
        }
    }

    fn staff_request() -> IssueRequest {
        IssueRequest {
            paciente_id: 1,
            servicio_id: 2,
            prioridad_id: 3,
            estado: None,
        }
    }

    #[tokio::test]
    async fn first_ticket_gets_the_service_starting_number() {
        let h = harness(StubTickets::default());

        let ticket = h.service.issue(staff_request()).await.expect("issued");

        assert_eq!(ticket.numero_ticket, 100);
        assert_eq!(ticket.estado, ESTADO_PENDIENTE);
    }

    #[tokio::test]
    async fn staff_numbering_advances_past_the_all_time_maximum() {
        let h = harness(StubTickets::default().seed(existing_ticket(1, 100, ts(2025, 5, 9, 9))));

        let ticket = h.service.issue(staff_request()).await.expect("issued");

        // Yesterday's ticket still counts: the staff scope is all-time.
        assert_eq!(ticket.numero_ticket, 101);
    }

    #[rstest]
    #[case(Some("derivado".to_owned()), "derivado")]
    #[case(Some("  ".to_owned()), ESTADO_PENDIENTE)]
    #[case(None, ESTADO_PENDIENTE)]
    #[tokio::test]
    async fn blank_status_falls_back_to_pendiente(
        #[case] estado: Option<String>,
        #[case] expected: &str,
    ) {
        let h = harness(StubTickets::default());
        let request = IssueRequest {
            estado,
            ..staff_request()
        };

        let ticket = h.service.issue(request).await.expect("issued");

        assert_eq!(ticket.estado, expected);
    }

    #[tokio::test]
    async fn unknown_service_is_a_validation_error() {
        let h = harness(StubTickets::default());
        let request = IssueRequest {
            servicio_id: 99,
            ..staff_request()
        };

        let err = h.service.issue(request).await.expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "El servicio no existe");
        assert_eq!(h.tickets.insert_calls(), 0);
    }

    #[tokio::test]
    async fn unknown_patient_is_a_validation_error() {
        let h = harness(StubTickets::default());
        let request = IssueRequest {
            paciente_id: 99,
            ..staff_request()
        };

        let err = h.service.issue(request).await.expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "El paciente no existe");
    }

    #[tokio::test]
    async fn public_numbering_ignores_previous_days() {
        // All-time max is 150 from yesterday; today is empty, so the kiosk
        // restarts at numero_inicial + 1.
        let h = harness(StubTickets::stamping(ts(2025, 5, 10, 9)).seed(existing_ticket(
            1,
            150,
            ts(2025, 5, 9, 16),
        )));
        let identidad = IdentityNumber::new("0123456789123").expect("valid identity");

        let public = h
            .service
            .issue_public(&identidad, 2)
            .await
            .expect("issued");

        assert_eq!(public.ticket.numero_ticket, 101);
        assert_eq!(public.ticket.prioridad_id, PRIORIDAD_PUBLICA);
        assert_eq!(public.letra, "B");
        assert_eq!(public.fecha, "10/05/2025");
        assert_eq!(public.hora, "09:00:00");
    }

    #[tokio::test]
    async fn public_numbering_advances_within_the_day() {
        let h = harness(StubTickets::stamping(ts(2025, 5, 10, 9)).seed(existing_ticket(
            1,
            101,
            ts(2025, 5, 10, 8),
        )));
        let identidad = IdentityNumber::new("0123456789123").expect("valid identity");

        let public = h
            .service
            .issue_public(&identidad, 2)
            .await
            .expect("issued");

        assert_eq!(public.ticket.numero_ticket, 102);
    }

    #[tokio::test]
    async fn public_unknown_patient_is_not_found() {
        let h = harness(StubTickets::default());
        let identidad = IdentityNumber::new("9999999999999").expect("valid identity");

        let err = h
            .service
            .issue_public(&identidad, 2)
            .await
            .expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Paciente no encontrado");
    }

    #[tokio::test]
    async fn issuance_retries_after_a_conflict() {
        let h = harness(StubTickets::default().with_conflicts(2));

        let ticket = h.service.issue(staff_request()).await.expect("issued");

        assert_eq!(ticket.numero_ticket, 100);
        assert_eq!(h.tickets.insert_calls(), 3);
    }

    #[tokio::test]
    async fn issuance_gives_up_after_three_conflicts() {
        let h = harness(StubTickets::default().with_conflicts(3));

        let err = h.service.issue(staff_request()).await.expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(h.tickets.insert_calls(), 3);
    }

    #[tokio::test]
    async fn lifecycle_operations_publish_their_events() {
        let h = harness(StubTickets::default());

        let issued = h.service.issue(staff_request()).await.expect("issued");
        let updated = h
            .service
            .set_status(issued.id, "derivado")
            .await
            .expect("updated");
        let called = h.service.call(issued.id).await.expect("called");

        assert_eq!(updated.estado, "derivado");
        assert_eq!(called.estado, ESTADO_LLAMADO);
        let names: Vec<&str> = h.sink.events().iter().map(TicketEvent::name).collect();
        assert_eq!(
            names,
            vec!["nuevo_ticket", "ticket_actualizado", "ticket_llamado"]
        );
    }

    #[tokio::test]
    async fn set_status_requires_a_status() {
        let h = harness(StubTickets::default());

        let err = h.service.set_status(1, "  ").await.expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "El estado es obligatorio");
    }

    #[tokio::test]
    async fn operations_on_missing_tickets_are_not_found() {
        let h = harness(StubTickets::default());

        for err in [
            h.service.get(42).await.expect_err("get"),
            h.service.set_status(42, "llamado").await.expect_err("set"),
            h.service.call(42).await.expect_err("call"),
            h.service.delete(42).await.expect_err("delete"),
        ] {
            assert_eq!(err.code(), ErrorCode::NotFound);
            assert_eq!(err.message(), "Ticket no encontrado");
        }
    }
}
