//! Copying the URL buffer to the system clipboard.

use log::info;

use crate::buffer::UrlBuffer;
use crate::error::ExportError;
use crate::export::to_clipboard_text;

/// Destination for copied text.
pub trait ClipboardSink {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Clipboard` if the write is denied or unsupported.
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// The system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;

        // X11/Wayland drop the contents with their owner, so block until a
        // clipboard manager has taken them.
        #[cfg(target_os = "linux")]
        let written = {
            use arboard::SetExtLinux;
            clipboard.set().wait().text(text.to_owned())
        };
        #[cfg(not(target_os = "linux"))]
        let written = clipboard.set_text(text.to_owned());

        written.map_err(|e| ExportError::Clipboard(e.to_string()))
    }
}

/// Copies the buffer, blank lines included, to the clipboard.
///
/// # Errors
///
/// Returns `ExportError::NoData` if the buffer is blank, or whatever the sink
/// reports when the write fails.
pub fn copy_buffer<C: ClipboardSink>(
    buffer: &UrlBuffer,
    clipboard: &mut C,
) -> Result<(), ExportError> {
    let text = to_clipboard_text(buffer)?;
    clipboard.set_text(text)?;
    info!("Copied {} URLs to the clipboard", buffer.entries().len());
    Ok(())
}
