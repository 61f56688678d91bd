/// Parse an integer from an optional string value, or return the given default otherwise.
///
/// Settings are stored as free-form strings, so numeric ones (like the low-stock threshold) go through this when
/// they are read back.
pub fn parse_i64_flag(value: Option<String>, default: i64) -> i64 {
    value.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(default)
}
