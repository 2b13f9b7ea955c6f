//! Session handling for the notes client
//!
//! - [`claims`]: unverified peek at the token's claims
//! - [`session`]: the startup [`SessionGate`] and the [`Authenticator`]
//!   login/register/logout flows

pub mod claims;
pub mod error;
pub mod session;

pub use claims::{Claims, peek_claims};
pub use error::{AuthError, AuthResult, ClaimsError};
pub use session::{Authenticator, SessionGate, SessionState};
