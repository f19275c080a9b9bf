//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel
//! - **fallback**: process-local store for entities without a persisted row
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod fallback;
pub mod persistence;
