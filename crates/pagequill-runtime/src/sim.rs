//! Simulated browser platform.
//!
//! Windows with ordered tabs, a last-focused pointer, and per-window
//! screenshots, driving the same traits the real platform would. Used by
//! tests and by the demo binary.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use pagequill_protocols::error::PlatformError;
use pagequill_protocols::platform::{
    ActionUiHost, TabHandle, TabId, WindowHost, WindowId,
};

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;

/// A solid-color PNG, the simulator's stand-in for a viewport screenshot.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("PNG encoding of an in-memory image cannot fail");
    buffer.into_inner()
}

#[derive(Debug)]
struct SimWindow {
    id: WindowId,
    tabs: Vec<TabHandle>,
    screenshot: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct SimState {
    windows: Vec<SimWindow>,
    last_focused: Option<WindowId>,
    current_window: Option<WindowId>,
    next_window: WindowId,
    next_tab: TabId,
}

/// Simulated window/tab tree.
#[derive(Default)]
pub struct SimBrowser {
    state: Mutex<SimState>,
}

impl SimBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a window; the first window becomes focused and current.
    pub fn add_window(&self) -> WindowId {
        let mut state = self.state.lock();
        state.next_window += 1;
        let id = state.next_window;
        state.windows.push(SimWindow {
            id,
            tabs: Vec::new(),
            screenshot: None,
        });
        if state.last_focused.is_none() {
            state.last_focused = Some(id);
        }
        if state.current_window.is_none() {
            state.current_window = Some(id);
        }
        id
    }

    /// Open a tab in a window; it becomes the window's active tab.
    pub fn add_tab(&self, window: WindowId, url: &str) -> TabId {
        let mut state = self.state.lock();
        state.next_tab += 1;
        let id = state.next_tab;
        if let Some(win) = state.windows.iter_mut().find(|w| w.id == window) {
            for tab in &mut win.tabs {
                tab.active = false;
            }
            win.tabs.push(TabHandle {
                id,
                window_id: window,
                url: url.to_string(),
                active: true,
            });
        }
        id
    }

    /// Make a tab the active one within its window.
    pub fn activate_tab(&self, tab: TabId) -> bool {
        let mut state = self.state.lock();
        for win in &mut state.windows {
            if win.tabs.iter().any(|t| t.id == tab) {
                for t in &mut win.tabs {
                    t.active = t.id == tab;
                }
                return true;
            }
        }
        false
    }

    /// Close a tab.
    pub fn close_tab(&self, tab: TabId) -> bool {
        let mut state = self.state.lock();
        for win in &mut state.windows {
            let before = win.tabs.len();
            win.tabs.retain(|t| t.id != tab);
            if win.tabs.len() != before {
                return true;
            }
        }
        false
    }

    /// Mark a window as the most recently focused.
    pub fn focus_window(&self, window: WindowId) {
        self.state.lock().last_focused = Some(window);
    }

    /// Forget window focus entirely, exercising the capture fallback.
    pub fn clear_focus(&self) {
        self.state.lock().last_focused = None;
    }

    /// The window whose active tab answers `current_active_tab`.
    pub fn set_current_window(&self, window: WindowId) {
        self.state.lock().current_window = Some(window);
    }

    pub fn set_screenshot(&self, window: WindowId, png: Vec<u8>) {
        let mut state = self.state.lock();
        if let Some(win) = state.windows.iter_mut().find(|w| w.id == window) {
            win.screenshot = Some(png);
        }
    }

    pub fn tab(&self, tab: TabId) -> Option<TabHandle> {
        let state = self.state.lock();
        state
            .windows
            .iter()
            .flat_map(|w| w.tabs.iter())
            .find(|t| t.id == tab)
            .cloned()
    }
}

#[async_trait]
impl WindowHost for SimBrowser {
    async fn current_active_tab(&self) -> Result<Option<TabHandle>, PlatformError> {
        let state = self.state.lock();
        let Some(current) = state.current_window else {
            return Ok(None);
        };
        Ok(state
            .windows
            .iter()
            .find(|w| w.id == current)
            .and_then(|w| w.tabs.iter().find(|t| t.active))
            .cloned())
    }

    async fn last_focused_window(&self) -> Result<Option<WindowId>, PlatformError> {
        Ok(self.state.lock().last_focused)
    }

    async fn active_tab_in_window(
        &self,
        window: WindowId,
    ) -> Result<Option<TabHandle>, PlatformError> {
        let state = self.state.lock();
        Ok(state
            .windows
            .iter()
            .find(|w| w.id == window)
            .and_then(|w| w.tabs.iter().find(|t| t.active))
            .cloned())
    }

    async fn active_tabs(&self) -> Result<Vec<TabHandle>, PlatformError> {
        let state = self.state.lock();
        Ok(state
            .windows
            .iter()
            .flat_map(|w| w.tabs.iter().filter(|t| t.active))
            .cloned()
            .collect())
    }

    async fn tab_by_id(&self, tab: TabId) -> Result<Option<TabHandle>, PlatformError> {
        Ok(self.tab(tab))
    }

    async fn capture_visible_tab(&self, window: WindowId) -> Result<Vec<u8>, PlatformError> {
        let state = self.state.lock();
        state
            .windows
            .iter()
            .find(|w| w.id == window)
            .and_then(|w| w.screenshot.clone())
            .ok_or_else(|| PlatformError::CaptureFailed(format!("window {} not visible", window)))
    }
}

/// Simulated extension-action UI, recording the applied behavior.
#[derive(Default)]
pub struct SimActionUi {
    calls: AtomicUsize,
    fail: Mutex<bool>,
    panel_on_action: Mutex<bool>,
}

impl SimActionUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next setup call to fail.
    pub fn fail_next(&self) {
        *self.fail.lock() = true;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Whether the action currently opens the panel.
    pub fn panel_on_action(&self) -> bool {
        *self.panel_on_action.lock()
    }
}

impl ActionUiHost for SimActionUi {
    fn open_panel_on_action(&self) -> Result<(), PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if std::mem::take(&mut *self.fail.lock()) {
            return Err(PlatformError::ActionUi("side panel unsupported".to_string()));
        }
        *self.panel_on_action.lock() = true;
        Ok(())
    }
}
