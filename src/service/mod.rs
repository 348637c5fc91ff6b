//! MallService: mutation semantics over any record store.

mod crud;
pub use crud::{MallService, UpdateOutcome};
