use kd_common::Rupees;

/// Amount and sender phone as extracted from a bank notification SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsPayment {
    pub amount: Rupees,
    pub phone: String,
}

/// Extract the credited amount and the 10-digit sender phone from a notification of the form
/// `Rs.<amount> Credited to A/c ... by <phone>` (case-insensitive).
///
/// Fractional amounts are rejected along with malformed text: order totals are whole rupees, so a
/// fractional credit can never match anything.
pub fn parse_payment_sms(sms: &str) -> Option<SmsPayment> {
    let amount_re = regex::Regex::new(r"(?i)Rs\.?\s*(\d+(?:\.\d+)?)\s+Credited").unwrap();
    let phone_re = regex::Regex::new(r"(?i)by\s+(\d{10})\b").unwrap();
    let amount: f64 = amount_re.captures(sms)?.get(1)?.as_str().parse().ok()?;
    let amount = Rupees::try_from(amount).ok()?;
    let phone = phone_re.captures(sms)?.get(1)?.as_str().to_string();
    Some(SmsPayment { amount, phone })
}
