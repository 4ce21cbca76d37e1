//! Calendar adapters - external busy feed implementations.
//!
//! - `CalendarHttpFeed` - live busy spans from the calendar-sync service
//! - `CachedBusyFeed` - Redis read-through cache over any busy feed

mod cached_feed;
mod http_feed;

pub use cached_feed::CachedBusyFeed;
pub use http_feed::{CalendarFeedConfig, CalendarHttpFeed};
