//! WebSocket adapter - the thin I/O shell around the auction core.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      axum upgrade                         │
//! │   reader task ── InboundFrame ──► EventRouter             │
//! │   writer task ◄── ServerFrame ── outbound queue           │
//! └──────────────────────────────────────────────────────────┘
//!                             │ dispatches
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │              application handlers (the core)              │
//! └──────────────────────────────────────────────────────────┘
//!                             │ ports
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                       RoomManager                         │
//! │   Room: A1            Room: A2                            │
//! │   ├── conn-a          ├── conn-c                          │
//! │   └── conn-b          └── conn-d                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire envelope and frame types (exact event names)
//! - [`rooms`] - Connection registry + room membership + delivery
//! - [`dispatch`] - Explicit event-name → handler table
//! - [`handler`] - axum WebSocket upgrade and connection lifecycle

pub mod dispatch;
pub mod handler;
pub mod messages;
pub mod rooms;

pub use dispatch::{auction_event_router, DispatchError, EventRouter, EXPECTED_EVENTS};
pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{InboundFrame, NewBidPayload, ServerFrame};
pub use rooms::RoomManager;
