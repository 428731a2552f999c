//! Domain models shared across the client.

pub mod user;

pub use user::{User, UserRecord};
