//! Terminal progress bar for export runs.
//!
//! Log events and the bar share stderr. [`SuspendingWriter`] buffers each
//! event and writes it while the bar is suspended, so log lines land above
//! the bar instead of over it.

use indicatif::{ProgressBar, ProgressStyle};
use oracle_ddl_export::{CatalogObject, ObjectOutcome, ProgressObserver};
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

const TEMPLATE: &str = "Extracting {bar:40.cyan/blue} {pos}/{len} files [{elapsed_precise}] {msg}";

/// Progress bar driven by exporter events.
///
/// Failures are reported by the exporter's own warnings; the bar only counts.
pub struct ExportProgress {
    bar: ProgressBar,
}

impl ExportProgress {
    /// Create a visible bar, or a hidden one when `enabled` is false.
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let style = ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            ProgressBar::new(0).with_style(style)
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// A stderr log writer that suspends this bar around each event.
    pub fn log_writer(&self) -> SuspendingWriter<fn() -> io::Stderr> {
        SuspendingWriter::new(self.bar.clone(), io::stderr as fn() -> io::Stderr)
    }
}

impl ProgressObserver for ExportProgress {
    fn on_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_object(&self, object: &CatalogObject, _outcome: &ObjectOutcome) {
        self.bar.set_message(object.name.clone());
        self.bar.inc(1);
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// `MakeWriter` that hides a progress bar while a log event is written.
#[derive(Clone)]
pub struct SuspendingWriter<M> {
    bar: ProgressBar,
    inner: M,
}

impl<M> SuspendingWriter<M> {
    pub fn new(bar: ProgressBar, inner: M) -> Self {
        Self { bar, inner }
    }
}

impl<'a, M> MakeWriter<'a> for SuspendingWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SuspendedEvent<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedEvent {
            bar: self.bar.clone(),
            inner: self.inner.make_writer(),
            buf: Vec::new(),
        }
    }
}

/// One buffered log event, flushed to the inner writer on drop.
pub struct SuspendedEvent<W: Write> {
    bar: ProgressBar,
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> Write for SuspendedEvent<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write> Drop for SuspendedEvent<W> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let buf = std::mem::take(&mut self.buf);
        let inner = &mut self.inner;
        // Nowhere to report a failed log write.
        self.bar.suspend(|| {
            let _ = inner.write_all(&buf);
            let _ = inner.flush();
        });
    }
}
