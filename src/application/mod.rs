//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing screen state, user interactions and queued API work.

pub mod state;

pub use state::*;
