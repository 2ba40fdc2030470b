//! Clipboard export for analysis reports

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Reports larger than this are refused (1MB is far beyond any real report)
const MAX_REPORT_BYTES: usize = 1024 * 1024;

/// Destination for copied text (the system clipboard, or a fake in tests)
trait ClipboardSink {
    fn put(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard(Clipboard);

impl ClipboardSink for SystemClipboard {
    fn put(&mut self, text: &str) -> Result<()> {
        self.0.set_text(text).context("Failed to set clipboard contents")
    }
}

fn check_report(report: &str) -> Result<()> {
    if report.trim().is_empty() {
        bail!("Nothing to copy: run an analysis first");
    }
    if report.len() > MAX_REPORT_BYTES {
        bail!("Report too large for clipboard ({} bytes, max {})", report.len(), MAX_REPORT_BYTES);
    }
    Ok(())
}

fn copy_into(report: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
    check_report(report)?;
    sink.put(report)
}

/// Copy a rendered report to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - The report is empty or oversized
/// - No system clipboard is available (headless session, missing X11/Wayland)
pub fn copy_report(report: &str) -> Result<()> {
    // Validate before touching the clipboard so headless runs get the real reason
    check_report(report)?;
    let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    copy_into(report, &mut SystemClipboard(clipboard))
}
