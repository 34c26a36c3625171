//! Clipboard backends.

use std::borrow::Cow;

use parking_lot::Mutex;
use tracing::debug;

use pagequill_protocols::error::PlatformError;
use pagequill_protocols::platform::ClipboardHost;

/// System clipboard backed by `arboard`.
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardHost for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    fn write_image_png(&self, png: &[u8]) -> Result<(), PlatformError> {
        let img = image::load_from_memory(png)
            .map_err(|e| PlatformError::Clipboard(format!("not a decodable image: {}", e)))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        debug!("Clipboard image write: {}x{}", width, height);

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        clipboard
            .set_image(arboard::ImageData {
                width: width as usize,
                height: height as usize,
                bytes: Cow::Owned(img.into_raw()),
            })
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard for tests and the simulator.
#[derive(Default)]
pub struct MemoryClipboard {
    texts: Mutex<Vec<String>>,
    images: Mutex<Vec<Vec<u8>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }

    pub fn images(&self) -> Vec<Vec<u8>> {
        self.images.lock().clone()
    }
}

impl ClipboardHost for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        self.texts.lock().push(text.to_string());
        Ok(())
    }

    fn write_image_png(&self, png: &[u8]) -> Result<(), PlatformError> {
        self.images.lock().push(png.to_vec());
        Ok(())
    }
}
