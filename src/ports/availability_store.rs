//! Availability store port (read side).
//!
//! Weekly recurring open hours per provider. This core never writes
//! availability; staff manage their hours through screens outside it.

use async_trait::async_trait;

use crate::domain::foundation::{DayOfWeek, DomainError, ProviderId};
use crate::domain::scheduling::AvailabilityWindow;

/// Read port for a provider's weekly availability windows.
///
/// Implementations must return only active windows and must make no
/// ordering or disjointness promises — consumers union the windows before
/// use.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Fetch the active windows for a provider on a weekday.
    ///
    /// A provider with no configured hours on that weekday yields an empty
    /// vector, never an error — the weekday is simply unbookable.
    async fn windows_for(
        &self,
        provider_id: &ProviderId,
        day: DayOfWeek,
    ) -> Result<Vec<AvailabilityWindow>, DomainError>;
}
