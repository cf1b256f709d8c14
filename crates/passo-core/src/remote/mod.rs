//! Remote (cloud) record store.
//!
//! The remote store is record oriented: each credential is a row owned by a
//! remote account. Only the secret is encrypted by Passo before it leaves
//! the device; `website` and `login` travel as given.

mod row;
pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteRemoteStore;
pub use traits::{RemoteCredential, RemoteStore};
