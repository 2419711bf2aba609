//! Render surfaces — where poll results land.
//!
//! The original display was a web page with four named text slots and a
//! summary block. The surface is passed to the poller explicitly rather
//! than bound as an ambient global, so tests and alternative displays
//! can provide their own target.

use crate::model::UserSnapshot;

/// Fixed fragment shown in place of the summary when a tick fails.
pub const ERROR_FRAGMENT: &str =
    "<p><strong>Error fetching user data. Please try again later.</strong></p>";

/// Build the summary fragment for a snapshot.
///
/// Markup matches the original `user-info` block, including the `@`
/// prefix on the username.
pub fn summary_fragment(snapshot: &UserSnapshot) -> String {
    format!(
        "<p><strong>Display Name:</strong> {}</p>\n\
         <p><strong>Username:</strong> @{}</p>\n\
         <p><strong>Last Change Time:</strong> {}</p>\n\
         <p><strong>Name Changed:</strong> {}</p>",
        snapshot.name_display(),
        snapshot.username_display(),
        snapshot.change_time_display(),
        snapshot.changed_display(),
    )
}

/// A target the poller writes into.
pub trait RenderSurface: Send {
    /// Set all four text slots and regenerate the summary fragment.
    fn apply(&mut self, snapshot: &UserSnapshot);

    /// Replace the summary fragment with the fixed error message.
    ///
    /// The text slots are deliberately left at their prior values, so
    /// stale data stays visible while the summary shows the failure.
    fn show_error(&mut self);
}

/// In-memory render target mirroring the page contract.
///
/// Slot names match the element identifiers the original page used:
/// `currentName`, `currentUsername`, `lastChangeTime`, `nameChanged`,
/// plus the `user-info` summary block.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub current_name: String,
    pub current_username: String,
    pub last_change_time: String,
    pub name_changed: String,
    pub user_info: String,
}

impl RenderSurface for Page {
    fn apply(&mut self, snapshot: &UserSnapshot) {
        self.current_name = snapshot.name_display().to_string();
        self.current_username = snapshot.username_display().to_string();
        self.last_change_time = snapshot.change_time_display().to_string();
        self.name_changed = snapshot.changed_display().to_string();
        self.user_info = summary_fragment(snapshot);
    }

    fn show_error(&mut self) {
        self.user_info = ERROR_FRAGMENT.to_string();
    }
}

/// Terminal surface: keeps a [`Page`] and echoes each update to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    page: Page,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying page state, as last rendered.
    pub fn page(&self) -> &Page {
        &self.page
    }
}

impl RenderSurface for ConsoleSurface {
    fn apply(&mut self, snapshot: &UserSnapshot) {
        self.page.apply(snapshot);
        println!(
            "  Display Name: {}  Username: @{}  Last Change: {}  Changed: {}",
            self.page.current_name,
            self.page.current_username,
            self.page.last_change_time,
            self.page.name_changed,
        );
    }

    fn show_error(&mut self) {
        self.page.show_error();
        println!("  Error fetching user data. Please try again later.");
    }
}
