//! Care service model.
//!
//! A service owns its own ticket-numbering sequence: `numero_inicial` seeds
//! the sequence and `letra` prefixes the number on printed tickets.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category of care with its own numbering sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    /// Surrogate key assigned by storage.
    pub id: i32,
    /// Display name, e.g. "Pediatría".
    pub nombre: String,
    /// Single-letter ticket prefix.
    pub letra: String,
    /// First number handed out when the sequence is empty.
    pub numero_inicial: i32,
}

/// Fields required to register a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    /// Display name.
    pub nombre: String,
    /// Single-letter ticket prefix.
    pub letra: String,
    /// Sequence seed.
    pub numero_inicial: i32,
}

impl NewService {
    /// Validate raw input. The letter must be a single character.
    pub fn from_parts(nombre: &str, letra: &str, numero_inicial: i32) -> Option<Self> {
        if nombre.trim().is_empty() || letra.trim().is_empty() {
            return None;
        }
        if letra.chars().count() != 1 {
            return None;
        }
        Some(Self {
            nombre: nombre.to_owned(),
            letra: letra.to_owned(),
            numero_inicial,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pediatría", "B", true)]
    #[case("Rayos X", "RX", false)]
    #[case("", "A", false)]
    #[case("Laboratorio", " ", false)]
    fn letter_must_be_single_character(#[case] nombre: &str, #[case] letra: &str, #[case] ok: bool) {
        assert_eq!(NewService::from_parts(nombre, letra, 100).is_some(), ok);
    }
}
