//! # Todo Store
//!
//! In-memory collection of todo records guarded by a single exclusive lock.
//!
//! # Invariants
//!
//! - Every id in the store is unique at any point in time
//! - Ids are assigned by the store on insert and never change afterwards
//! - Insertion order is preserved; deletes keep the relative order of the rest
//! - All operations are serialised through one lock, id generation included

mod errors;
mod id;
mod seed;
mod store;
mod todo;

pub use errors::{StoreError, StoreResult};
pub use id::{IdGenerator, ID_CHARSET, ID_LENGTH};
pub use seed::{seed_todos, SEED_COUNT};
pub use store::TodoStore;
pub use todo::Todo;
