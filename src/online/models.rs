use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::de::{optional_string_or_number, string_or_number};

#[derive(Debug, Clone)]
pub struct PaymentConfigRequest {
    pub transaction_id: String,
    pub amount: String,
}

/// Settlement report window. Both ends are wall-clock times in the
/// merchant's timezone.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct OrderLookup {
    pub order_id: String,
    pub amount: String,
}

#[derive(Debug, Clone)]
pub struct TransactionLookup {
    pub transaction_id: String,
    pub amount: String,
}

#[derive(Debug, Clone)]
pub struct RefundStatusRequest {
    pub order_id: String,
}

#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub order_id: String,
    pub transaction_id: String,
    pub amount: String,
}

/// One row of the daily settlement report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    #[serde(rename = "BillingDate")]
    pub billing_date: String,
    #[serde(rename = "OrderID", deserialize_with = "string_or_number")]
    pub order_id: String,
    #[serde(rename = "TranID", deserialize_with = "string_or_number")]
    pub tran_id: String,
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "Amount", deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(rename = "StatCode", deserialize_with = "string_or_number")]
    pub stat_code: String,
    #[serde(rename = "StatName")]
    pub stat_name: String,
    #[serde(rename = "BillingName", default)]
    pub billing_name: Option<String>,
    #[serde(rename = "ServiceItem", default)]
    pub service_item: Option<String>,
    #[serde(rename = "BillingEmail", default)]
    pub billing_email: Option<String>,
    #[serde(
        rename = "TransactionRate",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub transaction_rate: Option<String>,
    #[serde(
        rename = "TransactionCost",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub transaction_cost: Option<String>,
    #[serde(
        rename = "TransactionFee",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub transaction_fee: Option<String>,
    #[serde(
        rename = "BillingMobileNumber",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub billing_mobile_number: Option<String>,
    #[serde(rename = "GST", default, deserialize_with = "optional_string_or_number")]
    pub gst: Option<String>,
    #[serde(
        rename = "NetAmount",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub net_amount: Option<String>,
    #[serde(rename = "IPAddress", default)]
    pub ip_address: Option<String>,
    #[serde(rename = "BankName", default)]
    pub bank_name: Option<String>,
    #[serde(rename = "ExpiryDate", default)]
    pub expiry_date: Option<String>,
    #[serde(rename = "StatusDescription", default)]
    pub status_description: Option<String>,
    #[serde(rename = "SettlementDate", default)]
    pub settlement_date: Option<String>,
    #[serde(rename = "PaidDate", default)]
    pub paid_date: Option<String>,
    #[serde(rename = "CaptureRefID", default)]
    pub capture_ref_id: Option<String>,
    #[serde(
        rename = "TerminalID",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub terminal_id: Option<String>,
    #[serde(rename = "RefundRefID", default)]
    pub refund_ref_id: Option<String>,
}

/// Reply of the order id and transaction id lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "StatCode")]
    pub stat_code: String,
    #[serde(rename = "StatName")]
    pub stat_name: String,
    #[serde(rename = "TranID")]
    pub tran_id: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "VrfKey")]
    pub vrf_key: String,
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "ErrorCode", default)]
    pub error_code: Option<String>,
    #[serde(rename = "ErrorDesc", default)]
    pub error_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    #[serde(deserialize_with = "string_or_number")]
    pub error_code: String,
    #[serde(default)]
    pub error_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundStatusEntry {
    #[serde(rename = "TxnID", deserialize_with = "string_or_number")]
    pub txn_id: String,
    #[serde(rename = "RefID")]
    pub ref_id: String,
    #[serde(rename = "RefundID", deserialize_with = "string_or_number")]
    pub refund_id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "LastUpdate")]
    pub last_update: String,
}

/// Refund status lookup outcome. The provider reports lookup failures in
/// band, so they are a value here rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundStatus {
    Refund(RefundStatusEntry),
    Error(ErrorReply),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResult {
    #[serde(rename = "RefundType")]
    pub refund_type: String,
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    #[serde(rename = "RefID")]
    pub ref_id: String,
    #[serde(rename = "RefundID", deserialize_with = "string_or_number")]
    pub refund_id: String,
    #[serde(
        rename = "RefundFee",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub refund_fee: Option<String>,
    #[serde(rename = "TxnID", deserialize_with = "string_or_number")]
    pub txn_id: String,
    #[serde(rename = "Amount", deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Signature")]
    pub signature: String,
}
