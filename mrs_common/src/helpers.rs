use chrono::{DateTime, Utc};

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Milliseconds since the Unix epoch. This is the unit clients receive for every handler-generated timestamp.
pub fn epoch_millis(ts: &DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

/// Lower-case hex encoding of a byte slice.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
