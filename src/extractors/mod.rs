//! Request extractors.

pub mod credential;
pub use credential::Credential;
