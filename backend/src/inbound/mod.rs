//! Inbound adapters: HTTP REST endpoints and the WebSocket change feed.

pub mod http;
pub mod ws;
