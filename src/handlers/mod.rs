//! HTTP handlers for the mall resource.

pub mod mall;
pub use mall::*;
