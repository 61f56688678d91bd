pub mod order_text;
pub mod phone;
pub mod sms;

pub use order_text::{parse_item_lines, parse_order_sheet, OrderLine, OrderSheet};
pub use phone::{phone_variants, phones_match, strip_dial_prefix};
pub use sms::{parse_payment_sms, SmsPayment};
