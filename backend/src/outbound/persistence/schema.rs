//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// User accounts. `contrasena` holds the salted hash, never raw input.
    usuarios (id) {
        /// Primary key.
        id -> Int4,
        /// Username, unique.
        usuario -> Varchar,
        /// Email address, unique.
        correo -> Varchar,
        /// Salted password hash.
        contrasena -> Varchar,
        /// Role string embedded in issued tokens.
        rol -> Varchar,
    }
}

diesel::table! {
    /// Registered patients.
    pacientes (id) {
        /// Primary key.
        id -> Int4,
        /// National identity number, thirteen digits, unique.
        identidad -> Varchar,
        /// Given names.
        nombres -> Varchar,
        /// Family names.
        apellidos -> Varchar,
        /// Registration timestamp, defaulted by the database.
        fecha_registro -> Timestamp,
    }
}

diesel::table! {
    /// Registered doctors.
    medicos (id) {
        /// Primary key.
        id -> Int4,
        /// Given name.
        nombre -> Varchar,
        /// Family name.
        apellido -> Varchar,
        /// Profession or speciality label.
        profesion -> Varchar,
        /// Owning user account.
        usuario_id -> Int4,
    }
}

diesel::table! {
    /// Care services, each with its own numbering sequence.
    servicios (id) {
        /// Primary key.
        id -> Int4,
        /// Display name.
        nombre -> Varchar,
        /// Single-letter ticket prefix.
        letra -> Varchar,
        /// Sequence seed.
        numero_inicial -> Int4,
    }
}

diesel::table! {
    /// Consulting rooms. The (numero, servicio, medico) tuple is unique.
    consultorios (id) {
        /// Primary key.
        id -> Int4,
        /// Room number.
        numero -> Int4,
        /// Service attended in this room.
        servicio_id -> Int4,
        /// Doctor staffing this room.
        medico_id -> Int4,
    }
}

diesel::table! {
    /// Priority levels. Names are unique.
    prioridades (id) {
        /// Primary key.
        id -> Int4,
        /// Display name, unique.
        nombre -> Varchar,
        /// Numeric level.
        nivel_prioridad -> Int4,
    }
}

diesel::table! {
    /// Issued tickets.
    tickets (id) {
        /// Primary key.
        id -> Int4,
        /// Sequence number within the service.
        numero_ticket -> Int4,
        /// Patient the ticket belongs to.
        paciente_id -> Int4,
        /// Service the ticket queues for.
        servicio_id -> Int4,
        /// Priority tag.
        prioridad_id -> Int4,
        /// Free-form status.
        estado -> Varchar,
        /// Creation timestamp, defaulted by the database.
        fecha_hora -> Timestamp,
    }
}

diesel::joinable!(medicos -> usuarios (usuario_id));
diesel::joinable!(consultorios -> servicios (servicio_id));
diesel::joinable!(consultorios -> medicos (medico_id));
diesel::joinable!(tickets -> pacientes (paciente_id));
diesel::joinable!(tickets -> servicios (servicio_id));
diesel::joinable!(tickets -> prioridades (prioridad_id));

diesel::allow_tables_to_appear_in_same_query!(
    usuarios,
    pacientes,
    medicos,
    servicios,
    consultorios,
    prioridades,
    tickets,
);
