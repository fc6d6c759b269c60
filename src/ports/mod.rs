//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RoomRegistry` - Grouping connections into named auction rooms
//! - `Broadcaster` - Fire-and-forget delivery of events to clients

mod broadcaster;
mod room_registry;

pub use broadcaster::{Broadcaster, OutboundEvent};
pub use room_registry::RoomRegistry;
