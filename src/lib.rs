//! Empresas - Terminal Company Manager Library
//!
//! A terminal client for managing companies against a remote REST API.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
