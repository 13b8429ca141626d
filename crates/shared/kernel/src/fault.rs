//! Process-wide reporter for uncaught faults.
//!
//! A fault is logged once with whatever location metadata is available and is
//! then handed to the previously installed panic hook. There is no retry,
//! classification or recovery.

use std::fmt;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicBool, Ordering};

/// `tracing` target of every fault event.
pub const FAULT_TARGET: &str = "pm::fault";

static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// The five values delivered with an uncaught fault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultReport {
    pub message: String,
    pub source: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub error: Option<String>,
}

impl FaultReport {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }

    #[must_use]
    pub fn at(mut self, source: impl Into<String>, line: u32, column: u32) -> Self {
        self.source = Some(source.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Builds a report from a panic: payload text plus the panic location.
    #[must_use]
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let message = info.payload_as_str().unwrap_or("Box<dyn Any>");
        let report = Self::new(message);
        match info.location() {
            Some(location) => report.at(location.file(), location.line(), location.column()),
            None => report,
        }
    }
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(source) = &self.source {
            write!(f, " at {source}")?;
            if let (Some(line), Some(column)) = (self.line, self.column) {
                write!(f, ":{line}:{column}")?;
            }
        }
        if let Some(error) = &self.error {
            write!(f, " ({error})")?;
        }
        Ok(())
    }
}

/// Destination of fault reports.
pub trait FaultSink: Send + Sync {
    fn record(&self, report: &FaultReport);
}

/// Emits exactly one `ERROR` event on [`FAULT_TARGET`] per report.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FaultSink for TracingSink {
    fn record(&self, report: &FaultReport) {
        tracing::error!(
            target: FAULT_TARGET,
            fault.source = report.source.as_deref(),
            fault.line = report.line,
            fault.column = report.column,
            fault.error = report.error.as_deref(),
            "Unhandled fault: {}",
            report.message,
        );
    }
}

/// Installs the fault reporter with [`TracingSink`].
///
/// Returns `false` if a reporter was already installed.
pub fn install_panic_hook() -> bool {
    install_panic_hook_with(TracingSink)
}

/// Installs a panic hook that records every panic to `sink` and then chains to
/// the previous hook. Only the first call in a process has an effect.
pub fn install_panic_hook_with<S>(sink: S) -> bool
where
    S: FaultSink + 'static,
{
    if HOOK_INSTALLED.swap(true, Ordering::AcqRel) {
        return false;
    }

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        sink.record(&FaultReport::from_panic(info));
        previous(info);
    }));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn display_includes_location_and_error() {
        let report = FaultReport::new("boom").at("app.wasm", 12, 7).with_error("TypeError");
        assert_eq!(report.to_string(), "boom at app.wasm:12:7 (TypeError)");
        assert_eq!(FaultReport::new("bare").to_string(), "bare");
    }

    #[test]
    fn tracing_sink_emits_one_event_with_location() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let report = FaultReport::new("boom").at("app.wasm", 12, 7);
        tracing::subscriber::with_default(subscriber, || TracingSink.record(&report));

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1, "{output}");
        assert!(output.contains("ERROR"));
        assert!(output.contains(FAULT_TARGET));
        assert!(output.contains("Unhandled fault: boom"));
        assert!(output.contains("fault.source=\"app.wasm\""));
        assert!(output.contains("fault.line=12"));
        assert!(output.contains("fault.column=7"));
    }
}
