use crate::error::MeterError;
use pm_domain::constants::OBIS_ACTIVE_POWER;
use serde::Deserialize;
use serde_json::{Map, Value};

const WATTS_PER_KILOWATT: f64 = 1000.0;

#[derive(Debug, Deserialize)]
struct MeterPayload {
    #[serde(default)]
    reader_data: Vec<Map<String, Value>>,
}

/// Extracts the active power draw in watts from a meter status message.
///
/// The first `reader_data` entry carrying the active-power OBIS code wins; its
/// kW value may be a JSON number or a numeric string. Returns `Ok(None)` when
/// no entry carries the code.
///
/// # Errors
/// * [`MeterError::Payload`] if the bytes are not a JSON object.
/// * [`MeterError::InvalidValue`] if the power entry is not numeric.
pub fn parse_wattage(payload: &[u8]) -> Result<Option<f64>, MeterError> {
    let payload: MeterPayload = serde_json::from_slice(payload)?;

    let Some(value) = payload.reader_data.iter().find_map(|entry| entry.get(OBIS_ACTIVE_POWER))
    else {
        return Ok(None);
    };

    let kilowatts = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|kw| kw.is_finite())
    .ok_or_else(|| MeterError::InvalidValue {
        message: value.to_string().into(),
        context: Some(OBIS_ACTIVE_POWER.into()),
    })?;

    Ok(Some(kilowatts * WATTS_PER_KILOWATT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watts(payload: &str) -> Option<f64> {
        parse_wattage(payload.as_bytes()).unwrap()
    }

    #[test]
    fn converts_kilowatts_to_watts() {
        let w = watts(r#"{"reader_data":[{"1-0:1.8.0.255":"12345.6"},{"1-0:1.7.0.255":0.0523}]}"#);
        assert!((w.unwrap() - 52.3).abs() < 1e-9);
    }

    #[test]
    fn accepts_numeric_strings() {
        let w = watts(r#"{"reader_data":[{"1-0:1.7.0.255":" 0.125 "}]}"#);
        assert!((w.unwrap() - 125.0).abs() < 1e-9);
    }

    #[test]
    fn first_matching_entry_wins() {
        let w = watts(r#"{"reader_data":[{"1-0:1.7.0.255":0.1},{"1-0:1.7.0.255":0.2}]}"#);
        assert!((w.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_code_is_skipped() {
        assert_eq!(watts(r#"{"reader_data":[{"1-0:2.7.0.255":0.4}]}"#), None);
        assert_eq!(watts(r#"{"status":"ok"}"#), None);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(parse_wattage(b"not json"), Err(MeterError::Payload { .. })));
        assert!(matches!(
            parse_wattage(br#"{"reader_data":[{"1-0:1.7.0.255":"n/a"}]}"#),
            Err(MeterError::InvalidValue { .. })
        ));
    }
}
