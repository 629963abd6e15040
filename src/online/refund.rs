use serde::Serialize;
use tracing::instrument;

use crate::{
    de::is_truthy,
    error::{Error, Result},
    mask,
    online::{
        OnlineClient,
        models::{ErrorReply, RefundRequest, RefundResult, RefundStatus, RefundStatusRequest},
    },
    sign,
    transport::Transport,
};

/// Partial refund, the only type this client requests
const REFUND_TYPE: &str = "P";
const REFUND_NOTIFY_PATH: &str = "/rms/refund-notify";

fn has_error_code(value: &serde_json::Value) -> bool {
    value.get("error_code").is_some_and(is_truthy)
}

impl<T: Transport> OnlineClient<T> {
    /// Latest refund recorded for an order.
    ///
    /// The provider lists every refund of the order, only the first entry is
    /// returned.
    // TODO: expose the whole list once callers need partial refund history
    #[instrument(skip_all)]
    pub async fn refund_status_by_order_id(
        &self,
        request: &RefundStatusRequest,
    ) -> Result<RefundStatus> {
        #[derive(Serialize)]
        struct RefundStatusForm<'a> {
            #[serde(rename = "RefID")]
            ref_id: &'a str,
            #[serde(rename = "MerchantID")]
            merchant_id: &'a str,
            #[serde(rename = "Signature")]
            signature: String,
        }

        let input = sign::concat(&[
            ("orderId", request.order_id.as_str()),
            ("merchantId", self.config.merchant_id.as_str()),
            ("verifyKey", self.config.verify_key.expose()),
        ])?;
        let form = RefundStatusForm {
            ref_id: &request.order_id,
            merchant_id: &self.config.merchant_id,
            signature: sign::md5_hex(&input),
        };
        let body = self
            .api
            .post_form("/API/refundAPI/q_by_refID.php", &form)
            .await?;
        let response: serde_json::Value = serde_json::from_str(&body)?;
        tracing::debug!(data = %mask::secure_value(&response), "Refund status response");
        if has_error_code(&response) {
            let reply: ErrorReply = serde_json::from_value(response)?;
            return Ok(RefundStatus::Error(reply));
        }
        let Some(first) = response.as_array().and_then(|entries| entries.first()) else {
            return Err(Error::Mapping(
                "refund status reply is neither an error nor a non-empty list".into(),
            ));
        };
        Ok(RefundStatus::Refund(serde_json::from_value(first.clone())?))
    }

    /// Request a partial refund. The outcome is posted later to
    /// `{callbackUrl}/rms/refund-notify`.
    #[instrument(skip_all)]
    pub async fn request_refund(&self, request: &RefundRequest) -> Result<RefundResult> {
        #[derive(Serialize)]
        struct RefundForm<'a> {
            #[serde(rename = "RefundType")]
            refund_type: &'static str,
            #[serde(rename = "MerchantID")]
            merchant_id: &'a str,
            #[serde(rename = "RefID")]
            ref_id: &'a str,
            #[serde(rename = "TxnID")]
            txn_id: &'a str,
            #[serde(rename = "Amount")]
            amount: &'a str,
            #[serde(rename = "Signature")]
            signature: String,
            notify_url: String,
        }

        let input = sign::concat(&[
            ("refundType", REFUND_TYPE),
            ("merchantId", self.config.merchant_id.as_str()),
            ("orderId", request.order_id.as_str()),
            ("transactionId", request.transaction_id.as_str()),
            ("amount", request.amount.as_str()),
            ("secretKey", self.config.secret_key.expose()),
        ])?;
        let form = RefundForm {
            refund_type: REFUND_TYPE,
            merchant_id: &self.config.merchant_id,
            ref_id: &request.order_id,
            txn_id: &request.transaction_id,
            amount: &request.amount,
            signature: sign::md5_hex(&input),
            notify_url: format!(
                "{}{REFUND_NOTIFY_PATH}",
                self.config.callback_url.trim_end_matches('/')
            ),
        };
        let body = self.api.post_form("/API/refundAPI/index.php", &form).await?;
        let response: serde_json::Value = serde_json::from_str(&body)?;
        tracing::debug!(data = %mask::secure_value(&response), "Refund response");
        if has_error_code(&response) {
            return Err(Error::Provider(response));
        }
        Ok(serde_json::from_value(response)?)
    }
}
