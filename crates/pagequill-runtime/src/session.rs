//! Session wiring: a complete extension process over the in-process bus.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use pagequill_core::host::HostCoordinator;
use pagequill_core::page::{PageAgent, PageDom};
use pagequill_core::panel::Panel;
use pagequill_protocols::platform::{ClipboardHost, TabId, WindowId};

use crate::bus::ExtensionBus;
use crate::clipboard::MemoryClipboard;
use crate::sim::{SimActionUi, SimBrowser};

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// One simulated extension process: host coordinator, simulated browser,
/// page agents per loaded tab, and a bus connecting them.
pub struct Session {
    bus: Arc<ExtensionBus>,
    browser: Arc<SimBrowser>,
    coordinator: Arc<HostCoordinator>,
    action_ui: Arc<SimActionUi>,
    clipboard: Arc<MemoryClipboard>,
    pages: Mutex<HashMap<TabId, Arc<PageAgent>>>,
}

impl Session {
    /// Boot the process: install the coordinator on the bus and apply its
    /// one-time action-UI behavior.
    pub fn start() -> Self {
        let bus = Arc::new(ExtensionBus::new());
        let browser = Arc::new(SimBrowser::new());
        let action_ui = Arc::new(SimActionUi::new());
        let coordinator = Arc::new(HostCoordinator::new(action_ui.clone()));

        coordinator.setup_action_behavior();
        bus.set_host(coordinator.clone());
        info!("Session started");

        Self {
            bus,
            browser,
            coordinator,
            action_ui,
            clipboard: Arc::new(MemoryClipboard::new()),
            pages: Mutex::new(HashMap::new()),
        }
    }

    pub fn bus(&self) -> Arc<ExtensionBus> {
        self.bus.clone()
    }

    pub fn browser(&self) -> Arc<SimBrowser> {
        self.browser.clone()
    }

    pub fn coordinator(&self) -> Arc<HostCoordinator> {
        self.coordinator.clone()
    }

    pub fn action_ui(&self) -> Arc<SimActionUi> {
        self.action_ui.clone()
    }

    pub fn clipboard(&self) -> Arc<MemoryClipboard> {
        self.clipboard.clone()
    }

    pub fn open_window(&self) -> WindowId {
        self.browser.add_window()
    }

    /// Open a tab; like the platform, the new tab becomes active, which the
    /// coordinator observes.
    pub fn open_tab(&self, window: WindowId, url: &str) -> TabId {
        let tab = self.browser.add_tab(window, url);
        self.coordinator.on_tab_activated(tab);
        tab
    }

    pub fn activate_tab(&self, tab: TabId) {
        if self.browser.activate_tab(tab) {
            self.coordinator.on_tab_activated(tab);
        }
    }

    /// Close a tab: the platform forgets it, the coordinator purges it, and
    /// its page agent (if any) detaches from the bus.
    pub fn close_tab(&self, tab: TabId) {
        self.browser.close_tab(tab);
        self.coordinator.on_tab_removed(tab);
        self.bus.detach_page(tab);
        self.pages.lock().remove(&tab);
    }

    /// A page finished loading in a tab: attach its agent to the bus.
    pub fn load_page(&self, tab: TabId, dom: PageDom) -> Arc<PageAgent> {
        let agent = Arc::new(PageAgent::new(dom, self.bus.hub()));
        self.bus.attach_page(tab, agent.clone());
        self.pages.lock().insert(tab, agent.clone());
        agent
    }

    pub fn page(&self, tab: TabId) -> Option<Arc<PageAgent>> {
        self.pages.lock().get(&tab).cloned()
    }

    /// A panel controller wired to this session.
    pub fn build_panel(&self, model: &str) -> Panel {
        self.build_panel_with_clipboard(model, self.clipboard.clone())
    }

    /// A panel controller using a caller-supplied clipboard backend.
    pub fn build_panel_with_clipboard(
        &self,
        model: &str,
        clipboard: Arc<dyn ClipboardHost>,
    ) -> Panel {
        Panel::new(self.bus.clone(), self.browser.clone(), clipboard, model)
    }
}
