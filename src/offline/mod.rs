//! Offline (point-of-sale) API: QR scan payments, refunds, inquiries and
//! reversals.
//!
//! Every request is signed with HMAC-SHA256 keyed by the terminal secret. The
//! `hashType` and `version` literals are sent with the request and are also
//! part of the signed concatenation.

use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::{
    config::OfflineConfig,
    de::is_truthy,
    error::{Error, Result},
    mask,
    sign,
    transport::{HttpClient, ReqwestTransport, Transport, form_headers},
};

pub mod channel;
pub mod models;

use models::{
    InquireRequest, InquiryResult, RefundRequest, RefundResult, ReversalRequest, ReversalResult,
    ScanPayRequest, ScanPayResult,
};

const HASH_TYPE: &str = "hmac-sha256";
const VERSION: &str = "v2";

#[derive(Debug, Clone)]
pub struct OfflineClient<T = ReqwestTransport> {
    config: OfflineConfig,
    /// Refund, inquiry and reversal host
    api: HttpClient<T>,
    /// Scan payment host
    opa: HttpClient<T>,
}

impl OfflineClient<ReqwestTransport> {
    pub fn new(config: OfflineConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> OfflineClient<T> {
    const API_URL: &str = "https://api.merchant.razer.com/RMS/API/MOLOPA/";
    const OPA_URL: &str = "https://opa.merchant.razer.com/RMS/API/MOLOPA/";

    pub fn with_transport(config: OfflineConfig, transport: T) -> Result<Self> {
        Ok(Self {
            api: HttpClient::new(transport.clone(), Self::API_URL, form_headers())?,
            opa: HttpClient::new(transport, Self::OPA_URL, form_headers())?,
            config,
        })
    }

    pub fn config(&self) -> &OfflineConfig {
        &self.config
    }

    fn sign(&self, fields: &[(&'static str, &str)]) -> Result<String> {
        let input = sign::concat(fields)?;
        Ok(sign::hmac_sha256_hex(&self.config.secret_key, &input))
    }

    /// Charge the wallet whose code was scanned at the terminal.
    #[instrument(skip_all, fields(reference_id = %request.reference_id))]
    pub async fn scan_pay(&self, request: &ScanPayRequest) -> Result<ScanPayResult> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ScanPayForm<'a> {
            amount: &'a str,
            application_code: &'a str,
            authorization_code: &'a str,
            currency_code: &'a str,
            hash_type: &'static str,
            reference_id: &'a str,
            store_id: &'a str,
            terminal_id: &'a str,
            version: &'static str,
            signature: String,
        }

        let signature = self.sign(&[
            ("amount", request.amount.as_str()),
            ("applicationCode", self.config.application_code.as_str()),
            ("authorizationCode", request.authorization_code.as_str()),
            ("currencyCode", request.currency_code.as_str()),
            ("hashType", HASH_TYPE),
            ("referenceId", request.reference_id.as_str()),
            ("storeId", self.config.store_id.as_str()),
            ("terminalId", self.config.terminal_id.as_str()),
            ("version", VERSION),
        ])?;
        let form = ScanPayForm {
            amount: &request.amount,
            application_code: &self.config.application_code,
            authorization_code: &request.authorization_code,
            currency_code: &request.currency_code,
            hash_type: HASH_TYPE,
            reference_id: &request.reference_id,
            store_id: &self.config.store_id,
            terminal_id: &self.config.terminal_id,
            version: VERSION,
            signature,
        };
        let body = self.opa.post_form("payment.php", &form).await?;
        decode(&body)
    }

    #[instrument(skip_all, fields(reference_id = %request.reference_id))]
    pub async fn refund(&self, request: &RefundRequest) -> Result<RefundResult> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct RefundForm<'a> {
            amount: &'a str,
            application_code: &'a str,
            currency_code: &'a str,
            payment_reference_id: &'a str,
            reference_id: &'a str,
            version: &'static str,
            hash_type: &'static str,
            signature: String,
        }

        let signature = self.sign(&[
            ("amount", request.amount.as_str()),
            ("applicationCode", self.config.application_code.as_str()),
            ("currencyCode", request.currency_code.as_str()),
            ("hashType", HASH_TYPE),
            ("paymentReferenceId", request.payment_reference_id.as_str()),
            ("referenceId", request.reference_id.as_str()),
            ("version", VERSION),
        ])?;
        let form = RefundForm {
            amount: &request.amount,
            application_code: &self.config.application_code,
            currency_code: &request.currency_code,
            payment_reference_id: &request.payment_reference_id,
            reference_id: &request.reference_id,
            version: VERSION,
            hash_type: HASH_TYPE,
            signature,
        };
        let body = self.api.post_form("refund.php", &form).await?;
        decode(&body)
    }

    #[instrument(skip_all, fields(reference_id = %request.reference_id))]
    pub async fn inquire(&self, request: &InquireRequest) -> Result<InquiryResult> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct InquiryQuery<'a> {
            application_code: &'a str,
            hash_type: &'static str,
            reference_id: &'a str,
            version: &'static str,
            signature: String,
        }

        let signature = self.sign(&[
            ("applicationCode", self.config.application_code.as_str()),
            ("hashType", HASH_TYPE),
            ("referenceId", request.reference_id.as_str()),
            ("version", VERSION),
        ])?;
        let query = InquiryQuery {
            application_code: &self.config.application_code,
            hash_type: HASH_TYPE,
            reference_id: &request.reference_id,
            version: VERSION,
            signature,
        };
        let body = self.api.get("inquiry.php", &query).await?;
        decode(&body)
    }

    /// Void a same-day payment.
    #[instrument(skip_all, fields(reference_id = %request.reference_id))]
    pub async fn reversal(&self, request: &ReversalRequest) -> Result<ReversalResult> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ReversalForm<'a> {
            application_code: &'a str,
            version: &'static str,
            reference_id: &'a str,
            payment_reference_id: &'a str,
            hash_type: &'static str,
            signature: String,
        }

        let signature = self.sign(&[
            ("applicationCode", self.config.application_code.as_str()),
            ("hashType", HASH_TYPE),
            ("paymentReferenceId", request.payment_reference_id.as_str()),
            ("referenceId", request.reference_id.as_str()),
            ("version", VERSION),
        ])?;
        let form = ReversalForm {
            application_code: &self.config.application_code,
            version: VERSION,
            reference_id: &request.reference_id,
            payment_reference_id: &request.payment_reference_id,
            hash_type: HASH_TYPE,
            signature,
        };
        let body = self.api.post_form("reversal.php", &form).await?;
        decode(&body)
    }
}

/// Decode a typed reply. Any reply carrying a non-empty `errorCode` is a
/// provider rejection, whatever else it contains.
fn decode<R: DeserializeOwned>(body: &str) -> Result<R> {
    let response: serde_json::Value = serde_json::from_str(body)?;
    tracing::debug!(data = %mask::secure_value(&response), "RMS offline response");
    if response.get("errorCode").is_some_and(is_truthy) {
        return Err(Error::Provider(response));
    }
    Ok(serde_json::from_value(response)?)
}
