use kd_common::Rupees;
use serde::{Deserialize, Serialize};

use crate::db_types::{Order, RoleAssignment, Transaction, User};

/// A payment notification ready for matching: the caller (or the SMS helper) has already extracted the
/// amount and phone; the raw text rides along for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSmsNotification {
    pub sms_text: String,
    pub amount: Rupees,
    pub phone: String,
}

/// The two normal outcomes of processing a payment notification. An unmatched notification is a business
/// result, not a fault, and it still produces an audit record.
#[derive(Debug, Clone)]
pub enum SmsMatchOutcome {
    Matched { order: Order, transaction: Transaction },
    Unmatched { transaction: Transaction },
}

impl SmsMatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, SmsMatchOutcome::Matched { .. })
    }

    pub fn order_id(&self) -> Option<i64> {
        match self {
            SmsMatchOutcome::Matched { order, .. } => Some(order.id),
            SmsMatchOutcome::Unmatched { .. } => None,
        }
    }

    /// The human-readable outcome line shown to the operator.
    pub fn message(&self) -> String {
        match self {
            SmsMatchOutcome::Matched { order, .. } => format!("Payment confirmed for Order #{}", order.id),
            SmsMatchOutcome::Unmatched { transaction } => format!(
                "No matching order found for Rs.{} from {}",
                transaction.amount.value(),
                transaction.sender_phone
            ),
        }
    }
}

/// A user together with their role assignments, as served by the users listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub roles: Vec<RoleAssignment>,
}
