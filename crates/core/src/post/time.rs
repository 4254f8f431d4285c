//! Timestamp normalization.
//!
//! Date fields arrive in three encodings depending on the producer:
//! calendar text, an epoch-milliseconds number, or Firestore's native
//! `{ seconds: ... }` timestamp record. Every inbound date passes through
//! [`normalize`] exactly once before it is compared or stored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Convert any accepted timestamp encoding into a canonical UTC instant.
///
/// Total and side-effect free: unparseable text, an out-of-range epoch,
/// or an unrecognized shape all normalize to `None`, never an error.
pub fn normalize(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(text) => parse_text(text),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64))
            .and_then(DateTime::from_timestamp_millis),
        // Firestore timestamp record. The seconds field is trusted as a
        // number and must not take the text-parsing path.
        Value::Object(map) => {
            let seconds = map.get("seconds")?.as_i64()?;
            DateTime::from_timestamp_millis(seconds.checked_mul(1000)?)
        }
        _ => None,
    }
}

/// [`normalize`] over an optional raw value; absent input is absent output.
pub fn normalize_opt(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    raw.and_then(normalize)
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    // datetime-local form inputs carry no offset; interpret as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn all_encodings_of_one_instant_agree() {
        let text = json!("2024-05-01T12:00:00Z");
        let millis = json!(1_714_564_800_000_i64);
        let record = json!({ "seconds": 1_714_564_800 });

        assert_eq!(normalize(&text), Some(instant()));
        assert_eq!(normalize(&millis), Some(instant()));
        assert_eq!(normalize(&record), Some(instant()));
    }

    #[test]
    fn offset_text_converts_to_utc() {
        let raw = json!("2024-05-01T09:00:00-03:00");
        assert_eq!(normalize(&raw), Some(instant()));
    }

    #[test]
    fn datetime_local_and_bare_date_parse_as_utc() {
        assert_eq!(normalize(&json!("2024-05-01T12:00")), Some(instant()));
        assert_eq!(
            normalize(&json!("2024-05-01")),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_inputs_are_absent_not_errors() {
        assert_eq!(normalize(&json!("not a date")), None);
        assert_eq!(normalize(&json!("2024-13-45T99:99")), None);
        assert_eq!(normalize(&json!(i64::MAX)), None);
        assert_eq!(normalize(&json!(null)), None);
        assert_eq!(normalize(&json!(true)), None);
        assert_eq!(normalize(&json!(["2024-05-01"])), None);
    }

    #[test]
    fn unrecognized_records_are_absent() {
        assert_eq!(normalize(&json!({ "nanos": 12 })), None);
        assert_eq!(normalize(&json!({ "seconds": "1714564800" })), None);
    }

    #[test]
    fn absent_input_is_absent_output() {
        assert_eq!(normalize_opt(None), None);
        let raw = json!(1_714_564_800_000_i64);
        assert_eq!(normalize_opt(Some(&raw)), Some(instant()));
    }
}
