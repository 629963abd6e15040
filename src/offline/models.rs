use serde::{Deserialize, Serialize};

use crate::{
    de::{optional_string_or_number, string_or_number},
    offline::channel::OfflineChannel,
};

#[derive(Debug, Clone)]
pub struct ScanPayRequest {
    pub reference_id: String,
    /// Code scanned from the customer's wallet
    pub authorization_code: String,
    pub currency_code: String,
    pub amount: String,
}

#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub amount: String,
    pub currency_code: String,
    pub reference_id: String,
    pub payment_reference_id: String,
}

#[derive(Debug, Clone)]
pub struct InquireRequest {
    pub reference_id: String,
}

#[derive(Debug, Clone)]
pub struct ReversalRequest {
    pub reference_id: String,
    pub payment_reference_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanPayResult {
    pub reference_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub status_code: String,
    pub application_code: String,
    pub version: String,
    pub signature: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub amount: Option<String>,
    #[serde(default)]
    pub authorization_code: Option<String>,
    #[serde(default)]
    pub authorization_code_type: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub base_amount: Option<String>,
    #[serde(default)]
    pub base_currency_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub error_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub exchange_rate: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub mol_transaction_id: Option<String>,
    #[serde(default)]
    pub payer_id: Option<String>,
    #[serde(default)]
    pub transaction_date_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResult {
    pub reference_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub status_code: String,
    pub application_code: String,
    pub version: String,
    pub signature: String,
    #[serde(default)]
    pub hash_type: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub base_amount: Option<String>,
    #[serde(default)]
    pub base_currency_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub exchange_rate: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub mol_transaction_id: Option<String>,
    #[serde(default)]
    pub payment_reference_id: Option<String>,
    #[serde(default)]
    pub transaction_date_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResult {
    pub reference_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub status_code: String,
    pub application_code: String,
    pub version: String,
    pub signature: String,
    #[serde(default)]
    pub hash_type: Option<String>,
    #[serde(default)]
    pub authorization_code: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub mol_transaction_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub exchange_rate: Option<String>,
    #[serde(default)]
    pub base_currency_code: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub base_amount: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub transaction_date_time: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversalResult {
    pub reference_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub status_code: String,
    pub application_code: String,
    pub version: String,
    pub signature: String,
    #[serde(default)]
    pub hash_type: Option<String>,
    #[serde(default)]
    pub payment_reference_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub mol_transaction_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub channel_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub transaction_date_time: Option<String>,
}

macro_rules! channel_accessor {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// Payment channel resolved from `channelId`
                pub fn channel(&self) -> Option<OfflineChannel> {
                    self.channel_id.as_deref().and_then(OfflineChannel::from_code)
                }
            }
        )+
    };
}

channel_accessor!(ScanPayResult, RefundResult, InquiryResult, ReversalResult);
