//! Adapters - Implementations of port interfaces.
//!
//! - `websocket` - axum WebSocket transport: room manager (implements
//!   both ports), wire protocol, dispatch table, upgrade handler

pub mod websocket;
