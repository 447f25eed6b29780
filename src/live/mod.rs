//! Live updates pushed by the backend over its WebSocket broker.
//!
//! The transport sits behind [`FrameSource`]; [`LiveFeed`] keeps it connected
//! and turns decoded messages into [`RefreshTrigger`]s, which a [`Refresher`]
//! feeds back into the list controllers.

mod feed;
mod message;

pub use feed::{
    DEFAULT_RECONNECT_DELAY, FeedError, Frame, FrameSource, LiveFeed, Refresh, Refresher,
};
pub use message::{LiveMessage, RefreshTrigger, Topic};
