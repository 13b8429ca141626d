//! Uncaught script errors as fault reports.

use powermatch::kernel::fault::FaultReport;

/// Message browsers report when the failing script hides its details.
pub const OPAQUE_SCRIPT_ERROR: &str = "Script error.";

/// Builds the report for `window.onerror(message, source, lineno, colno, error)`.
///
/// Browsers pass `0` and `""` for unknown positions and sources; both map to
/// `None`.
#[must_use]
pub fn script_fault(
    message: Option<String>,
    source: Option<String>,
    line: Option<f64>,
    column: Option<f64>,
    error: Option<String>,
) -> FaultReport {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| OPAQUE_SCRIPT_ERROR.to_owned());
    let source = source.filter(|s| !s.is_empty());
    let line = line.and_then(position);
    let column = column.and_then(position);

    let report = match (source, line) {
        (Some(source), Some(line)) => {
            let mut report =
                FaultReport::new(message).at(source, line, column.unwrap_or_default());
            report.column = column;
            report
        },
        (source, line) => FaultReport { source, line, column, ..FaultReport::new(message) },
    };

    match error.filter(|e| !e.is_empty()) {
        Some(error) => report.with_error(error),
        None => report,
    }
}

/// 1-based script position; `0`, negatives and non-numbers are unknown.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn position(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX)).then(|| value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_five_values_are_carried() {
        let report = script_fault(
            Some("Uncaught TypeError: x is undefined".into()),
            Some("http://localhost:8000/assets/pm-web.js".into()),
            Some(120.0),
            Some(7.0),
            Some("TypeError: x is undefined".into()),
        );

        assert_eq!(report.message, "Uncaught TypeError: x is undefined");
        assert_eq!(report.source.as_deref(), Some("http://localhost:8000/assets/pm-web.js"));
        assert_eq!(report.line, Some(120));
        assert_eq!(report.column, Some(7));
        assert_eq!(report.error.as_deref(), Some("TypeError: x is undefined"));
    }

    #[test]
    fn opaque_errors_keep_only_the_message() {
        let report =
            script_fault(Some(String::new()), Some(String::new()), Some(0.0), Some(0.0), None);
        assert_eq!(report, FaultReport::new(OPAQUE_SCRIPT_ERROR));

        let report = script_fault(None, None, None, None, None);
        assert_eq!(report.message, OPAQUE_SCRIPT_ERROR);
    }

    #[test]
    fn unknown_column_is_not_reported_as_zero() {
        let report =
            script_fault(Some("boom".into()), Some("app.js".into()), Some(3.0), Some(0.0), None);
        assert_eq!(report.line, Some(3));
        assert_eq!(report.column, None);
        assert_eq!(report.to_string(), "boom at app.js");
    }

    #[test]
    fn bogus_positions_are_dropped() {
        let report = script_fault(
            Some("boom".into()),
            Some("app.js".into()),
            Some(f64::NAN),
            Some(-4.0),
            None,
        );
        assert_eq!(report.source.as_deref(), Some("app.js"));
        assert_eq!(report.line, None);
        assert_eq!(report.column, None);
    }
}
