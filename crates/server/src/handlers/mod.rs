//! HTTP request handlers.

pub mod admin;
pub mod common;
pub mod dashboard;
pub mod records;
pub mod trash;

pub use admin::*;
pub use common::*;
pub use dashboard::*;
pub use records::*;
pub use trash::*;
