use kaamdhenu_engine::capabilities::Role;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/payments/process-sms`. The operator console pre-fills `amount`/`phone` by parsing the
/// SMS text client-side; when they are absent the server runs the same extraction itself before giving up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsIngest {
    pub sms_text: String,
    pub amount: Option<f64>,
    pub phone: Option<String>,
}

/// Response of the process-sms endpoint. Both business outcomes are 200s; `success` says which one this is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsProcessResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRemoveRequest {
    pub telegram_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistrictFilter {
    pub district: Option<String>,
}
