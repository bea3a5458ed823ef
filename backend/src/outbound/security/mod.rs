//! Identity-guard adapters: bcrypt hashing, HS256 tokens, system clock.

mod clock;
mod hasher;
mod token;

pub use clock::SystemClock;
pub use hasher::BcryptPasswordHasher;
pub use token::JwtTokenCodec;
