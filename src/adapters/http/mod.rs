//! HTTP adapters - REST API implementations.

pub mod booking;
pub mod health;

// Re-export key types for convenience
pub use booking::booking_router;
pub use booking::BookingAppState;
pub use health::health_router;
