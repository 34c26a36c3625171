//! Region-capture orchestration and the captured-image list.

use std::io::Cursor;

use chrono::{DateTime, Utc};
use image::{GenericImageView, ImageFormat};
use tracing::{debug, warn};
use uuid::Uuid;

use pagequill_protocols::geometry::CaptureArea;
use pagequill_protocols::message::AgentRequest;
use pagequill_protocols::platform::WindowId;

use crate::data_url;

use super::{Panel, PanelError, NO_TARGET_TAB, RELOAD_PAGE};

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;

/// One captured region, most-recent-first in the panel's display list.
#[derive(Debug, Clone)]
pub struct CaptureArtifact {
    pub id: Uuid,
    pub png: Vec<u8>,
    pub area: CaptureArea,
    pub captured_at: DateTime<Utc>,
}

impl Panel {
    /// Ask the target page to bring up its region-selection overlay.
    ///
    /// The result arrives later as a `captureSelected` notification;
    /// there is no timeout, the user may take as long as they like
    /// (or press Escape on the page).
    pub async fn begin_capture(&mut self) {
        let tab = match self.resolve_target_tab().await {
            Ok(Some(tab)) => tab,
            Ok(None) => {
                self.status(NO_TARGET_TAB);
                return;
            }
            Err(e) => {
                warn!("Target resolution failed: {}", e);
                self.status(NO_TARGET_TAB);
                return;
            }
        };

        if let Err(e) = self
            .bus
            .request_page(tab.id, AgentRequest::StartCapture)
            .await
        {
            warn!("Overlay request failed: {}", e);
            self.status(RELOAD_PAGE);
        }
    }

    /// A region was selected on some page: screenshot the source window and
    /// crop the region out of it.
    pub(super) async fn capture_and_crop(&mut self, area: CaptureArea) {
        let window = match self.resolve_capture_window().await {
            Ok(window) => window,
            Err(e) => {
                warn!("No window to capture: {}", e);
                self.status("No tab available to capture");
                return;
            }
        };

        let png = match self.windows.capture_visible_tab(window).await {
            Ok(png) => png,
            Err(e) => {
                warn!("Viewport capture failed: {}", e);
                self.status(format!("Capture failed: {}", e));
                return;
            }
        };

        match crop_region(&png, &area) {
            Ok(cropped) => {
                debug!("Captured region: {} bytes", cropped.len());
                self.artifacts.insert(
                    0,
                    CaptureArtifact {
                        id: Uuid::new_v4(),
                        png: cropped,
                        area,
                        captured_at: Utc::now(),
                    },
                );
                self.status("Region captured");
            }
            Err(e) => {
                warn!("Crop failed: {}", e);
                self.status(format!("Capture failed: {}", e));
            }
        }
    }

    /// The window whose viewport should be captured.
    ///
    /// Primary path: the last-focused window, provided it has an active
    /// tab. Fallback: the first active tab anywhere (first match wins).
    async fn resolve_capture_window(&self) -> Result<WindowId, PanelError> {
        if let Ok(Some(window)) = self.windows.last_focused_window().await {
            if let Ok(Some(_)) = self.windows.active_tab_in_window(window).await {
                return Ok(window);
            }
        }

        let tabs = self.windows.active_tabs().await?;
        tabs.first()
            .map(|tab| tab.window_id)
            .ok_or(PanelError::NoTargetTab)
    }

    // --- artifact operations --------------------------------------------

    /// Captured images, most recent first.
    pub fn artifacts(&self) -> &[CaptureArtifact] {
        &self.artifacts
    }

    /// Drop a captured image from the list.
    pub fn remove_artifact(&mut self, id: Uuid) -> bool {
        let before = self.artifacts.len();
        self.artifacts.retain(|artifact| artifact.id != id);
        self.artifacts.len() != before
    }

    /// Copy a captured image to the system clipboard.
    pub fn copy_artifact(&mut self, id: Uuid) {
        let Some(artifact) = self.artifacts.iter().find(|a| a.id == id) else {
            return;
        };
        match self.clipboard.write_image_png(&artifact.png) {
            Ok(()) => self.status("Image copied to clipboard"),
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.status("Copy failed");
            }
        }
    }

    /// Paste a captured image into the target page.
    ///
    /// The target tab is re-resolved now: the originally captured tab may
    /// no longer be where the user wants the image.
    pub async fn paste_artifact(&mut self, id: Uuid) {
        let Some(artifact) = self.artifacts.iter().find(|a| a.id == id) else {
            return;
        };
        let url = data_url::encode_png(&artifact.png);

        let tab = match self.resolve_target_tab().await {
            Ok(Some(tab)) => tab,
            Ok(None) => {
                self.status(NO_TARGET_TAB);
                return;
            }
            Err(e) => {
                warn!("Target resolution failed: {}", e);
                self.status(NO_TARGET_TAB);
                return;
            }
        };

        match self
            .bus
            .request_page(tab.id, AgentRequest::PasteImage { data_url: url })
            .await
        {
            Ok(response) if response.paste_success() == Some(true) => {
                self.status("Image pasted to page");
            }
            Ok(_) => {
                self.status("Paste failed: select a rich-text field");
            }
            Err(e) => {
                warn!("Image paste failed: {}", e);
                self.status(RELOAD_PAGE);
            }
        }
    }
}

/// Crop a viewport screenshot to the selected area, scaled by the page's
/// device pixel ratio and clamped to the image bounds.
pub(crate) fn crop_region(png: &[u8], area: &CaptureArea) -> Result<Vec<u8>, PanelError> {
    let img = image::load_from_memory(png)
        .map_err(|e| PanelError::Image(format!("Failed to decode screenshot: {}", e)))?;

    let rect = area
        .to_device_pixels()
        .clamped_to(img.width(), img.height())
        .ok_or_else(|| PanelError::Image("Selected region is outside the page".to_string()))?;

    let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height);
    let mut buffer = Cursor::new(Vec::new());
    cropped
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| PanelError::Image(format!("Failed to encode crop: {}", e)))?;
    Ok(buffer.into_inner())
}
