//! The user snapshot — the value object served over the wire.

use serde::{Deserialize, Serialize};

/// Rendered stand-in for a field the server did not supply.
pub const FIELD_FALLBACK: &str = "N/A";

/// Latest known state of a tracked profile.
///
/// Constructed per request on the serving side, deserialized on receipt
/// by the poller, consumed immediately to update a render surface, then
/// discarded. All string fields are optional and defaulted at render
/// time, never in the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// Display name, as last seen upstream.
    pub current_name: Option<String>,
    /// Handle (without the `@` prefix).
    pub current_username: Option<String>,
    /// When the display name last changed, pre-formatted for display.
    pub last_change_time: Option<String>,
    /// Whether the most recent check observed a name change.
    #[serde(default)]
    pub name_changed: bool,
}

/// Empty strings count as absent: the display never shows a blank slot.
fn non_empty(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => FIELD_FALLBACK,
    }
}

impl UserSnapshot {
    pub fn name_display(&self) -> &str {
        non_empty(self.current_name.as_deref())
    }

    pub fn username_display(&self) -> &str {
        non_empty(self.current_username.as_deref())
    }

    pub fn change_time_display(&self) -> &str {
        non_empty(self.last_change_time.as_deref())
    }

    pub fn changed_display(&self) -> &'static str {
        if self.name_changed {
            "Yes"
        } else {
            "No"
        }
    }
}
