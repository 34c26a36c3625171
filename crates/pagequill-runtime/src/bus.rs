//! In-process message bus.
//!
//! Routes each request to the handler registered for its destination and
//! awaits exactly one response. Attaching and detaching page handlers
//! models content scripts loading and unloading; a request to a tab with
//! no handler is the channel failure the panel surfaces as
//! "reload the page".

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use pagequill_protocols::bus::{HostHandler, MessageBus, NotificationSink, PageHandler};
use pagequill_protocols::error::BusError;
use pagequill_protocols::message::{
    AgentRequest, AgentResponse, HostRequest, HostResponse, Notification,
};
use pagequill_protocols::platform::TabId;

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;

const NOTIFICATION_CAPACITY: usize = 32;

/// Broadcast fan-out for fire-and-forget notifications.
///
/// Shared between the bus and the page agents so agents can emit without
/// holding a bus reference.
pub struct NotificationHub {
    tx: broadcast::Sender<Notification>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl NotificationSink for NotificationHub {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification dropped: no subscribers");
        }
    }
}

/// The in-process bus connecting host coordinator, page agents, and panel.
pub struct ExtensionBus {
    pages: RwLock<HashMap<TabId, Arc<dyn PageHandler>>>,
    host: RwLock<Option<Arc<dyn HostHandler>>>,
    hub: Arc<NotificationHub>,
}

impl Default for ExtensionBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionBus {
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            host: RwLock::new(None),
            hub: Arc::new(NotificationHub::new()),
        }
    }

    /// The notification sink injected into page agents.
    pub fn hub(&self) -> Arc<NotificationHub> {
        self.hub.clone()
    }

    /// Install the host coordinator's handler.
    pub fn set_host(&self, handler: Arc<dyn HostHandler>) {
        *self.host.write() = Some(handler);
    }

    /// A page finished loading in a tab; reloads replace the old handler.
    pub fn attach_page(&self, tab: TabId, handler: Arc<dyn PageHandler>) {
        debug!("Page agent attached: tab {}", tab);
        self.pages.write().insert(tab, handler);
    }

    /// The page in a tab went away.
    pub fn detach_page(&self, tab: TabId) {
        debug!("Page agent detached: tab {}", tab);
        self.pages.write().remove(&tab);
    }

    /// Subscribe to notifications without going through the trait.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.hub.subscribe()
    }
}

#[async_trait]
impl MessageBus for ExtensionBus {
    async fn request_page(
        &self,
        tab: TabId,
        request: AgentRequest,
    ) -> Result<AgentResponse, BusError> {
        trace!("Bus request to tab {}: {:?}", tab, request);
        let handler = self
            .pages
            .read()
            .get(&tab)
            .cloned()
            .ok_or(BusError::PageUnreachable(tab))?;
        Ok(handler.handle(request).await)
    }

    async fn request_host(&self, request: HostRequest) -> Result<HostResponse, BusError> {
        trace!("Bus request to host: {:?}", request);
        let handler = self.host.read().clone().ok_or(BusError::HostUnavailable)?;
        Ok(handler.handle(request).await)
    }

    fn notify(&self, notification: Notification) {
        self.hub.notify(notification);
    }

    fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.hub.subscribe()
    }
}
