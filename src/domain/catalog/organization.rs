//! Organization read model.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, OrganizationSlug, ValidationError};

/// The tenant an appointment book belongs to.
///
/// The organization timezone governs all slot arithmetic: availability
/// windows are wall-clock values in this zone, and a guest's browser
/// timezone is only ever used to render results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for this organization.
    pub id: OrganizationId,

    /// URL-safe slug used by the public booking surface.
    pub slug: OrganizationSlug,

    /// Display name.
    pub name: String,

    /// IANA timezone all scheduling arithmetic is done in.
    pub timezone: Tz,
}

impl Organization {
    /// Parses an IANA timezone name, rejecting unknown zones at the
    /// boundary so the scheduler never sees an invalid one.
    pub fn parse_timezone(name: &str) -> Result<Tz, ValidationError> {
        name.parse().map_err(|_| {
            ValidationError::invalid_format(
                "timezone",
                format!("unknown IANA timezone '{}'", name),
            )
        })
    }
}
