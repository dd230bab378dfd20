//! Recipe-management backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, pure search/aggregation
//! logic, services, and ports; [`inbound`] adapts HTTP and WebSocket
//! traffic onto the domain; [`outbound`] implements the ports against
//! PostgreSQL. The binary in `main.rs` wires the three together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
