//! # unitrack-store — Record Persistence
//!
//! The commission engine reads partners, students, and applications and
//! writes partners back through the [`RecordStore`] trait. Nothing about the
//! backing storage leaks into the engine; saves are plain insert-or-replace
//! with last-writer-wins semantics.
//!
//! - [`InMemoryStore`] (`memory.rs`): cloneable handle over lock-guarded maps.
//! - [`Snapshot`] (`snapshot.rs`): the JSON document the CLI loads and writes.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use snapshot::Snapshot;
pub use traits::RecordStore;
