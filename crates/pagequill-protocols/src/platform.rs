//! Browser-owned platform surfaces.
//!
//! The hosting browser owns windows, tabs, screenshots, the system
//! clipboard, and the extension-action UI. Each surface is a trait so the
//! components stay testable against simulated implementations.

use async_trait::async_trait;

use crate::error::PlatformError;

/// Tab identifier assigned by the platform.
pub type TabId = u32;

/// Window identifier assigned by the platform.
pub type WindowId = u32;

/// URL scheme of pages hosted by the extension itself (the panel,
/// the settings page). Tabs on this scheme are never paste targets.
pub const EXTENSION_SCHEME: &str = "extension://";

/// A live tab as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHandle {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: String,
    pub active: bool,
}

impl TabHandle {
    /// Whether this tab hosts one of the extension's own pages.
    pub fn is_extension_page(&self) -> bool {
        self.url.starts_with(EXTENSION_SCHEME)
    }
}

/// Window and tab queries plus viewport capture.
#[async_trait]
pub trait WindowHost: Send + Sync {
    /// The active tab of the caller's current window, if any.
    async fn current_active_tab(&self) -> Result<Option<TabHandle>, PlatformError>;

    /// The most recently focused window, if any.
    async fn last_focused_window(&self) -> Result<Option<WindowId>, PlatformError>;

    /// The active tab within a specific window.
    async fn active_tab_in_window(&self, window: WindowId)
        -> Result<Option<TabHandle>, PlatformError>;

    /// Every tab currently flagged active, across all windows, in window
    /// order.
    async fn active_tabs(&self) -> Result<Vec<TabHandle>, PlatformError>;

    /// Look up a tab by id; `None` when the tab no longer exists.
    async fn tab_by_id(&self, tab: TabId) -> Result<Option<TabHandle>, PlatformError>;

    /// Capture the visible viewport of a window's active tab as PNG bytes.
    async fn capture_visible_tab(&self, window: WindowId) -> Result<Vec<u8>, PlatformError>;
}

/// System clipboard writes.
pub trait ClipboardHost: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), PlatformError>;
    fn write_image_png(&self, png: &[u8]) -> Result<(), PlatformError>;
}

/// Extension-action UI behavior.
pub trait ActionUiHost: Send + Sync {
    /// Configure the extension action to open the persistent panel instead
    /// of a transient popup. Idempotent.
    fn open_panel_on_action(&self) -> Result<(), PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str) -> TabHandle {
        TabHandle {
            id: 1,
            window_id: 1,
            url: url.to_string(),
            active: true,
        }
    }

    #[test]
    fn test_extension_page_detection() {
        assert!(tab("extension://panel.html").is_extension_page());
        assert!(!tab("https://example.com").is_extension_page());
        assert!(!tab("").is_extension_page());
    }
}
