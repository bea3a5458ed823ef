//! HS256 bearer-token adapter.
//!
//! Tokens embed the account id, username, and role, and expire 24 hours
//! after issue. Verification never reveals why a token was rejected.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::ports::{IdentityError, TokenCodec};
use crate::domain::{Claims, TOKEN_TTL_SECS, User};

/// HS256 codec keyed with the configured signing secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    secret: String,
}

impl JwtTokenCodec {
    /// Build a codec from the signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user: &User) -> Result<String, IdentityError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: user.id,
            usuario: user.usuario.clone(),
            rol: user.rol.clone(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|err| IdentityError::failure(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, IdentityError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| IdentityError::invalid_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "clave-de-prueba-con-largo-suficiente";

    fn user() -> User {
        User {
            id: 7,
            usuario: "recepcion1".to_owned(),
            correo: "recepcion@hospital.hn".to_owned(),
            rol: "admin".to_owned(),
        }
    }

    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new(TEST_SECRET)
    }

    fn token_with_age(age_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: 7,
            usuario: "recepcion1".to_owned(),
            rol: "admin".to_owned(),
            iat: now - age_secs,
            exp: now - age_secs + TOKEN_TTL_SECS,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("encode")
    }

    #[test]
    fn issue_then_verify_round_trips_the_claims() {
        let token = codec().issue(&user()).expect("issue");

        let claims = codec().verify(&token).expect("verify");
        assert_eq!(claims.id, 7);
        assert_eq!(claims.usuario, "recepcion1");
        assert_eq!(claims.rol, "admin");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn token_still_valid_after_twenty_three_hours() {
        let token = token_with_age(23 * 60 * 60);

        assert!(codec().verify(&token).is_ok());
    }

    #[test]
    fn token_rejected_after_twenty_five_hours() {
        let token = token_with_age(25 * 60 * 60);

        assert_eq!(
            codec().verify(&token).expect_err("must be expired"),
            IdentityError::invalid_token()
        );
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = codec().issue(&user()).expect("issue");

        let other = JwtTokenCodec::new("otra-clave-con-largo-suficiente!");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for garbage in ["", "not.a.jwt", "solo-texto"] {
            assert!(codec().verify(garbage).is_err());
        }
    }
}
