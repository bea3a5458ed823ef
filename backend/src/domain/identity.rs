//! Identity attached to authenticated requests.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Token validity window in seconds (24 hours).
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in a bearer token.
///
/// Issued on login and attached to every authenticated request by the
/// bearer extractor. The `exp`/`iat` pair follows the JWT registered-claim
/// convention (Unix timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account identifier.
    pub id: i32,
    /// Username at issue time.
    pub usuario: String,
    /// Role string at issue time.
    pub rol: String,
    /// Issued-at, Unix timestamp.
    pub iat: i64,
    /// Expiry, Unix timestamp.
    pub exp: i64,
}
