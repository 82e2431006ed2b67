//! Shared types and models for the Inventory & Order Management Platform
//!
//! This crate contains the domain entities, the order state-machine rules,
//! and the pure allocation/validation logic shared between the backend and
//! other components of the system.

pub mod allocation;
pub mod models;
pub mod validation;

pub use allocation::*;
pub use models::*;
pub use validation::*;
