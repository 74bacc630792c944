//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: mutex-guarded in-memory store for database-less runs
//! - **blob**: media URL resolution for stored image keys
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod blob;
pub mod memory;
pub mod persistence;
