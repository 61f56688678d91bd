//! Phone comparison tolerant of the Indian dial prefix.
//!
//! Order records and SMS notifications carry the same number in up to three shapes: bare digits, digits with
//! a `+91` prefix, and a prefixed number with the prefix stripped. Both sides are normalised by optionally
//! stripping a leading `+91` before comparing.

pub const DIAL_PREFIX: &str = "+91";

pub fn strip_dial_prefix(phone: &str) -> &str {
    phone.strip_prefix(DIAL_PREFIX).unwrap_or(phone)
}

pub fn phones_match(a: &str, b: &str) -> bool {
    strip_dial_prefix(a) == strip_dial_prefix(b)
}

/// The representations under which `phone` may appear in a stored order, for use in an `IN (…)` lookup.
pub fn phone_variants(phone: &str) -> [String; 3] {
    [phone.to_string(), format!("{DIAL_PREFIX}{phone}"), strip_dial_prefix(phone).to_string()]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_tolerant_matching() {
        assert!(phones_match("9876543210", "+919876543210"));
        assert!(phones_match("+919876543210", "9876543210"));
        assert!(phones_match("9876543210", "9876543210"));
        assert!(!phones_match("9876543210", "9876543211"));
    }

    #[test]
    fn variants_cover_all_shapes() {
        let v = phone_variants("9876543210");
        assert_eq!(v[0], "9876543210");
        assert_eq!(v[1], "+919876543210");
        assert_eq!(v[2], "9876543210");
        let v = phone_variants("+919876543210");
        assert_eq!(v[2], "9876543210");
    }
}
