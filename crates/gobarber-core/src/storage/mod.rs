//! Persistent key-value storage for session data.
//!
//! The session manager keeps its durable copy of the signed-in session in two
//! string slots of a [`KeyValueStore`]. This mirrors the browser's session
//! storage: values are plain strings under fixed keys and survive restarts of
//! the client process.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`]: in-process storage that also records every call, used by
//!   tests and throwaway sessions
//! - [`FileStore`]: a JSON file on disk with owner-only permissions

mod error;
mod file;
mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::{MemoryStore, StoreOperation};

/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "@GoBarber:token";

/// Key under which the JSON-serialized user record is stored.
pub const USER_KEY: &str = "@GoBarber:user";

/// String key-value storage with get/set/remove semantics.
///
/// Implementations synchronize internally so a store can be shared behind an
/// `Arc` between the session manager and whoever created it.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
