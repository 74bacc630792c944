//! Bookstore catalogue backend.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports;
//! [`inbound::http`] adapts actix-web requests onto the driving ports;
//! [`outbound`] implements the driven ports over PostgreSQL, an in-memory
//! store and the media URL resolver.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

#[cfg(test)]
pub(crate) mod test_support;
