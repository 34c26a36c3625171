//! Shared fakes for panel tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use pagequill_protocols::bus::MessageBus;
use pagequill_protocols::error::{BusError, PlatformError, ProviderError};
use pagequill_protocols::message::{
    AgentRequest, AgentResponse, HostRequest, HostResponse, Notification,
};
use pagequill_protocols::platform::{ClipboardHost, TabHandle, TabId, WindowHost, WindowId};
use pagequill_protocols::provider::{TextGenerator, Turn};

pub fn content_tab(id: TabId, window_id: WindowId, url: &str) -> TabHandle {
    TabHandle {
        id,
        window_id,
        url: url.to_string(),
        active: true,
    }
}

pub fn panel_tab(id: TabId, window_id: WindowId) -> TabHandle {
    content_tab(id, window_id, "extension://panel.html")
}

/// A solid-color PNG of the given size.
pub fn test_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 212, 255]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Scripted bus: fixed per-tab responses, a fixed host answer, and request
/// recording.
pub struct FakeBus {
    pub last_tab: Mutex<Option<TabId>>,
    pub page_responses: Mutex<HashMap<TabId, AgentResponse>>,
    pub page_requests: Mutex<Vec<(TabId, AgentRequest)>>,
    pub host_requests: Mutex<Vec<HostRequest>>,
    notify_tx: broadcast::Sender<Notification>,
}

impl Default for FakeBus {
    fn default() -> Self {
        let (notify_tx, _) = broadcast::channel(16);
        Self {
            last_tab: Mutex::new(None),
            page_responses: Mutex::new(HashMap::new()),
            page_requests: Mutex::new(Vec::new()),
            host_requests: Mutex::new(Vec::new()),
            notify_tx,
        }
    }
}

impl FakeBus {
    pub fn set_page_response(&self, tab: TabId, response: AgentResponse) {
        self.page_responses.lock().insert(tab, response);
    }

    pub fn set_last_tab(&self, tab: Option<TabId>) {
        *self.last_tab.lock() = tab;
    }
}

#[async_trait]
impl MessageBus for FakeBus {
    async fn request_page(
        &self,
        tab: TabId,
        request: AgentRequest,
    ) -> Result<AgentResponse, BusError> {
        self.page_requests.lock().push((tab, request));
        self.page_responses
            .lock()
            .get(&tab)
            .cloned()
            .ok_or(BusError::PageUnreachable(tab))
    }

    async fn request_host(&self, request: HostRequest) -> Result<HostResponse, BusError> {
        self.host_requests.lock().push(request);
        Ok(HostResponse::LastTabId {
            tab_id: *self.last_tab.lock(),
        })
    }

    fn notify(&self, notification: Notification) {
        let _ = self.notify_tx.send(notification);
    }

    fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }
}

/// Scripted window host.
#[derive(Default)]
pub struct FakeWindows {
    pub current_active: Mutex<Option<TabHandle>>,
    pub last_focused: Mutex<Option<WindowId>>,
    pub fail_last_focused: Mutex<bool>,
    pub window_active_tabs: Mutex<HashMap<WindowId, TabHandle>>,
    pub all_active: Mutex<Vec<TabHandle>>,
    pub tabs: Mutex<HashMap<TabId, TabHandle>>,
    pub screenshots: Mutex<HashMap<WindowId, Vec<u8>>>,
}

impl FakeWindows {
    pub fn add_tab(&self, tab: TabHandle) {
        self.tabs.lock().insert(tab.id, tab);
    }
}

#[async_trait]
impl WindowHost for FakeWindows {
    async fn current_active_tab(&self) -> Result<Option<TabHandle>, PlatformError> {
        Ok(self.current_active.lock().clone())
    }

    async fn last_focused_window(&self) -> Result<Option<WindowId>, PlatformError> {
        if *self.fail_last_focused.lock() {
            return Err(PlatformError::WindowQuery("no focused window".to_string()));
        }
        Ok(*self.last_focused.lock())
    }

    async fn active_tab_in_window(
        &self,
        window: WindowId,
    ) -> Result<Option<TabHandle>, PlatformError> {
        Ok(self.window_active_tabs.lock().get(&window).cloned())
    }

    async fn active_tabs(&self) -> Result<Vec<TabHandle>, PlatformError> {
        Ok(self.all_active.lock().clone())
    }

    async fn tab_by_id(&self, tab: TabId) -> Result<Option<TabHandle>, PlatformError> {
        Ok(self.tabs.lock().get(&tab).cloned())
    }

    async fn capture_visible_tab(&self, window: WindowId) -> Result<Vec<u8>, PlatformError> {
        self.screenshots
            .lock()
            .get(&window)
            .cloned()
            .ok_or_else(|| PlatformError::CaptureFailed("window has no screenshot".to_string()))
    }
}

/// Recording clipboard.
#[derive(Default)]
pub struct FakeClipboard {
    pub texts: Mutex<Vec<String>>,
    pub images: Mutex<Vec<Vec<u8>>>,
    pub fail: Mutex<bool>,
}

impl ClipboardHost for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        if *self.fail.lock() {
            return Err(PlatformError::Clipboard("denied".to_string()));
        }
        self.texts.lock().push(text.to_string());
        Ok(())
    }

    fn write_image_png(&self, png: &[u8]) -> Result<(), PlatformError> {
        if *self.fail.lock() {
            return Err(PlatformError::Clipboard("denied".to_string()));
        }
        self.images.lock().push(png.to_vec());
        Ok(())
    }
}

/// Generator returning a fixed result and recording every call.
pub struct ScriptedGenerator {
    pub response: Mutex<Result<String, ProviderError>>,
    pub calls: AtomicUsize,
    pub seen_models: Mutex<Vec<String>>,
    pub seen_turns: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Mutex::new(Ok(text.to_string())),
            calls: AtomicUsize::new(0),
            seen_models: Mutex::new(Vec::new()),
            seen_turns: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            response: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
            seen_models: Mutex::new(Vec::new()),
            seen_turns: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, model: &str, turns: &[Turn]) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_models.lock().push(model.to_string());
        self.seen_turns.lock().push(turns.to_vec());
        self.response.lock().clone()
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        Ok(vec!["scripted-model".to_string()])
    }
}
