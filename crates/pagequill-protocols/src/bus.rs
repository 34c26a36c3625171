//! Message bus protocol definitions.
//!
//! The three execution contexts (host coordinator, page agents, panel
//! controller) share no memory; everything crosses the host-managed bus as
//! a request awaiting exactly one response, or as a fire-and-forget
//! notification. A missing destination is a channel failure, reported to
//! the caller and never fatal to any context.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::BusError;
use crate::message::{AgentRequest, AgentResponse, HostRequest, HostResponse, Notification};
use crate::platform::TabId;

/// Request handler implemented by a page agent. One handler per loaded tab.
#[async_trait]
pub trait PageHandler: Send + Sync {
    async fn handle(&self, request: AgentRequest) -> AgentResponse;
}

/// Request handler implemented by the host coordinator.
#[async_trait]
pub trait HostHandler: Send + Sync {
    async fn handle(&self, request: HostRequest) -> HostResponse;
}

/// Fire-and-forget notification emission.
///
/// Injected into page agents so overlay completion can reach the panel
/// without the agent holding a bus reference.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Request/response routing between contexts.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Send a request to the page agent of a tab and await its response.
    ///
    /// # Errors
    ///
    /// [`BusError::PageUnreachable`] when no agent is attached for the tab
    /// (the page is not loaded or the tab is gone).
    async fn request_page(
        &self,
        tab: TabId,
        request: AgentRequest,
    ) -> Result<AgentResponse, BusError>;

    /// Send a request to the host coordinator and await its response.
    async fn request_host(&self, request: HostRequest) -> Result<HostResponse, BusError>;

    /// Broadcast a notification to all subscribers.
    fn notify(&self, notification: Notification);

    /// Subscribe to notifications.
    fn notifications(&self) -> broadcast::Receiver<Notification>;
}
