//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns: the REST
//! client for the collaborator API and CSV export of the fetched list.

pub mod api;
pub mod export;

pub use api::*;
pub use export::*;
