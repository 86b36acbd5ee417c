//! Desktop notification channel.
//!
//! Timer start/stop events are pushed to browser listeners over a
//! Server-Sent Events stream. The channel is advisory only: events are not
//! acknowledged, not replayed to late subscribers, and silently dropped when
//! nobody is listening or the endpoint could not be bound.
//!
//! - `event.rs` - The JSON event payloads
//! - `broadcaster.rs` - Subscriber registry and fan-out
//! - `server.rs` - HTTP endpoint serving `GET /events`

mod broadcaster;
mod error;
mod event;
mod server;

pub use broadcaster::{Broadcaster, SubscriberId, Subscription};
pub use error::{NotificationError, NotificationResult};
pub use event::TimerEvent;
pub use server::EventServer;
