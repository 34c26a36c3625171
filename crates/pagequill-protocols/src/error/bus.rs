//! Message bus errors.

use thiserror::Error;

use crate::platform::TabId;

/// Channel failures: the destination context cannot be reached.
///
/// Always recoverable; the sender surfaces the failure to the user and
/// continues.
#[derive(Debug, Clone, Error)]
pub enum BusError {
    #[error("Page agent unreachable in tab {0}")]
    PageUnreachable(TabId),

    #[error("Host coordinator unavailable")]
    HostUnavailable,
}
