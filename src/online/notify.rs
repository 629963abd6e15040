use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    online::OnlineClient,
    sign,
    transport::Transport,
};

/// Payment notification posted by the gateway to the merchant's return,
/// notify and callback URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyPayload {
    #[serde(default)]
    pub nbcb: String,
    pub amount: String,
    pub orderid: String,
    #[serde(rename = "tranID")]
    pub tran_id: String,
    pub domain: String,
    pub status: String,
    /// Bank approval code, empty for channels that do not issue one
    #[serde(default)]
    pub appcode: String,
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_desc: String,
    pub skey: String,
    pub currency: String,
    #[serde(default)]
    pub channel: String,
    #[serde(rename = "extraP", default, skip_serializing_if = "Option::is_none")]
    pub extra_p: Option<String>,
    pub paydate: String,
}

/// Refund outcome posted to `{callbackUrl}/rms/refund-notify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundNotifyPayload {
    #[serde(rename = "RefundType")]
    pub refund_type: String,
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    #[serde(rename = "RefID")]
    pub ref_id: String,
    #[serde(rename = "RefundID")]
    pub refund_id: String,
    #[serde(rename = "TxnID")]
    pub txn_id: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Signature")]
    pub signature: String,
    #[serde(default)]
    pub reason: String,
}

impl<T: Transport> OnlineClient<T> {
    /// Expected `skey` of a payment notification.
    pub fn notify_key(&self, notify: &NotifyPayload) -> Result<String> {
        let merchant_id = self.config.merchant_id.as_str();
        let primary = sign::md5_hex(&sign::concat(&[
            ("tranID", notify.tran_id.as_str()),
            ("orderid", notify.orderid.as_str()),
            ("status", notify.status.as_str()),
            ("merchantId", merchant_id),
            ("amount", notify.amount.as_str()),
            ("currency", notify.currency.as_str()),
        ])?);
        let mut input = sign::concat(&[
            ("paydate", notify.paydate.as_str()),
            ("merchantId", merchant_id),
            ("primaryKey", primary.as_str()),
        ])?;
        input.push_str(&notify.appcode);
        input.push_str(self.config.secret_key.expose());
        Ok(sign::md5_hex(&input))
    }

    /// Expected `Signature` of a refund notification.
    pub fn refund_notify_key(&self, notify: &RefundNotifyPayload) -> Result<String> {
        let input = sign::concat(&[
            ("RefundType", notify.refund_type.as_str()),
            ("MerchantID", notify.merchant_id.as_str()),
            ("RefID", notify.ref_id.as_str()),
            ("RefundID", notify.refund_id.as_str()),
            ("TxnID", notify.txn_id.as_str()),
            ("Amount", notify.amount.as_str()),
            ("Status", notify.status.as_str()),
            ("secretKey", self.config.secret_key.expose()),
        ])?;
        Ok(sign::md5_hex(&input))
    }

    pub fn verify_notify(&self, notify: &NotifyPayload) -> Result<bool> {
        Ok(sign::matches(&self.notify_key(notify)?, &notify.skey))
    }

    pub fn verify_refund_notify(&self, notify: &RefundNotifyPayload) -> Result<bool> {
        Ok(sign::matches(
            &self.refund_notify_key(notify)?,
            &notify.signature,
        ))
    }
}
