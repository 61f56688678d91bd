mod helpers;
pub mod op;
mod rupees;

pub use helpers::parse_i64_flag;
pub use rupees::{Rupees, RupeesConversionError, RUPEE_CURRENCY_CODE};
