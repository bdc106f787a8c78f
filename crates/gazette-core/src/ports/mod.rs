//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod media;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use media::{MAX_IMAGE_BYTES, MediaError, MediaStore};
pub use repository::{BaseRepository, ContactRepository, PostRepository, UserRepository};
