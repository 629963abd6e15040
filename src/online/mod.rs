//! Online (e-commerce) API: payment channels, transaction lookups, refunds
//! and webhook verification.
//!
//! Signatures on this API are md5 digests, except the time-stamped channel
//! listing which the provider requires to be an HMAC-SHA256 keyed by the
//! verify key.

use serde::Serialize;
use time::{OffsetDateTime, macros::format_description};
use tracing::instrument;

use crate::{
    config::OnlineConfig,
    de::is_truthy,
    error::{Error, Result},
    mask,
    sign,
    transport::{HttpClient, ReqwestTransport, Transport, form_headers},
};

pub mod channel;
mod lines;
pub mod models;
pub mod notify;
mod refund;

use channel::{Channel, RawChannel};
use models::{
    DateRange, OrderLookup, PaymentConfigRequest, PaymentTransaction, TransactionLookup,
    TransactionQuery,
};
use notify::NotifyPayload;

#[derive(Debug, Clone)]
pub struct OnlineClient<T = ReqwestTransport> {
    config: OnlineConfig,
    /// Reporting and refund host
    api: HttpClient<T>,
    /// Channel listing and notification host
    pay: HttpClient<T>,
}

impl OnlineClient<ReqwestTransport> {
    pub fn new(config: OnlineConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> OnlineClient<T> {
    const API_URL: &str = "https://api.merchant.razer.com/RMS";
    const PAY_URL: &str = "https://pay.merchant.razer.com/RMS";

    pub fn with_transport(config: OnlineConfig, transport: T) -> Result<Self> {
        Ok(Self {
            api: HttpClient::new(transport.clone(), Self::API_URL, form_headers())?,
            pay: HttpClient::new(transport, Self::PAY_URL, form_headers())?,
            config,
        })
    }

    pub fn config(&self) -> &OnlineConfig {
        &self.config
    }

    /// `vcode` to embed into a hosted payment form.
    pub fn payment_config(&self, request: &PaymentConfigRequest) -> Result<String> {
        let input = sign::concat(&[
            ("amount", request.amount.as_str()),
            ("merchantId", self.config.merchant_id.as_str()),
            ("transactionId", request.transaction_id.as_str()),
            ("verifyKey", self.config.verify_key.expose()),
        ])?;
        Ok(sign::md5_hex(&input))
    }

    /// Acknowledge a payment notification back to the gateway.
    #[instrument(skip_all)]
    pub async fn echo_back(&self, notify: &NotifyPayload) -> Result<()> {
        #[derive(Serialize)]
        struct EchoBack<'a> {
            #[serde(flatten)]
            notify: &'a NotifyPayload,
            treq: &'static str,
        }

        self.pay
            .post_form(
                "/API/chkstat/returnipn.php",
                &EchoBack { notify, treq: "1" },
            )
            .await?;
        Ok(())
    }

    /// Channels enabled for the merchant, signed with the current local time.
    pub async fn channels(&self) -> Result<Vec<Channel>> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.channels_at(now).await
    }

    #[instrument(skip_all)]
    pub async fn channels_at(&self, datetime: OffsetDateTime) -> Result<Vec<Channel>> {
        #[derive(Serialize)]
        struct ChannelStatusForm<'a> {
            #[serde(rename = "merchantID")]
            merchant_id: &'a str,
            datetime: &'a str,
            skey: String,
        }

        let datetime = datetime
            .format(format_description!("[year][month][day][hour][minute][second]"))
            .map_err(|e| Error::InvalidRequest(format!("datetime: {e}")))?;
        let input = sign::concat(&[
            ("datetime", datetime.as_str()),
            ("merchantId", self.config.merchant_id.as_str()),
        ])?;
        let form = ChannelStatusForm {
            merchant_id: &self.config.merchant_id,
            datetime: &datetime,
            skey: sign::hmac_sha256_hex(&self.config.verify_key, &input),
        };
        let body = self
            .pay
            .post_form("/API/chkstat/channel_status.php", &form)
            .await?;
        let response: serde_json::Value = serde_json::from_str(&body)?;
        if !response.get("status").is_some_and(is_truthy) {
            return Err(Error::Provider(response));
        }
        let Some(result) = response.get("result") else {
            return Err(Error::Mapping("channel status reply has no result".into()));
        };
        let raw: Vec<RawChannel> = serde_json::from_value(result.clone())?;
        tracing::debug!(count = raw.len(), "Fetched payment channels");
        Ok(raw.into_iter().map(Channel::from).collect())
    }

    /// Daily settlement report for transactions from `start` to `end`.
    #[instrument(skip_all)]
    pub async fn transactions_by_date(&self, range: &DateRange) -> Result<Vec<PaymentTransaction>> {
        #[derive(Serialize)]
        struct PsqQuery<'a> {
            #[serde(rename = "merchantID")]
            merchant_id: &'a str,
            skey: String,
            rdate: &'a str,
            rduration: i64,
            version: u8,
            response_type: &'static str,
            additional_fields: &'static str,
        }

        let duration = (range.end - range.start).whole_seconds();
        if duration < 0 {
            return Err(Error::InvalidRequest("date range ends before it starts".into()));
        }
        let rdate = range
            .start
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .map_err(|e| Error::InvalidRequest(format!("start date: {e}")))?;
        let input = sign::concat(&[
            ("rdate", rdate.as_str()),
            ("merchantId", self.config.merchant_id.as_str()),
            ("secretKey", self.config.secret_key.expose()),
        ])?;
        let query = PsqQuery {
            merchant_id: &self.config.merchant_id,
            skey: sign::md5_hex(&input),
            rdate: &rdate,
            rduration: duration,
            version: 3,
            response_type: "json",
            additional_fields: "all",
        };
        let body = self.api.get("/API/PSQ/psq-daily.php", &query).await?;
        let response: serde_json::Value = serde_json::from_str(&body)?;
        if response.get("error_code").is_some_and(is_truthy) {
            return Err(Error::Provider(response));
        }
        let transactions: Vec<PaymentTransaction> = serde_json::from_value(response)?;
        tracing::debug!(count = transactions.len(), "Fetched settlement report");
        Ok(transactions)
    }

    #[instrument(skip_all)]
    pub async fn transaction_by_order_id(&self, lookup: &OrderLookup) -> Result<TransactionQuery> {
        #[derive(Serialize)]
        struct OidQuery<'a> {
            amount: &'a str,
            domain: &'a str,
            #[serde(rename = "oID")]
            order_id: &'a str,
            skey: String,
        }

        let input = sign::concat(&[
            ("orderId", lookup.order_id.as_str()),
            ("merchantId", self.config.merchant_id.as_str()),
            ("verifyKey", self.config.verify_key.expose()),
            ("amount", lookup.amount.as_str()),
        ])?;
        let query = OidQuery {
            amount: &lookup.amount,
            domain: &self.config.merchant_id,
            order_id: &lookup.order_id,
            skey: sign::md5_hex(&input),
        };
        let body = self.api.get("/query/q_by_oid.php", &query).await?;
        parse_transaction_query(&body)
    }

    #[instrument(skip_all)]
    pub async fn transaction_by_transaction_id(
        &self,
        lookup: &TransactionLookup,
    ) -> Result<TransactionQuery> {
        #[derive(Serialize)]
        struct TidQuery<'a> {
            amount: &'a str,
            domain: &'a str,
            #[serde(rename = "txID")]
            transaction_id: &'a str,
            skey: String,
        }

        let input = sign::concat(&[
            ("transactionId", lookup.transaction_id.as_str()),
            ("merchantId", self.config.merchant_id.as_str()),
            ("verifyKey", self.config.verify_key.expose()),
            ("amount", lookup.amount.as_str()),
        ])?;
        let query = TidQuery {
            amount: &lookup.amount,
            domain: &self.config.merchant_id,
            transaction_id: &lookup.transaction_id,
            skey: sign::md5_hex(&input),
        };
        let body = self.api.get("/q_by_tid.php", &query).await?;
        parse_transaction_query(&body)
    }
}

fn parse_transaction_query(body: &str) -> Result<TransactionQuery> {
    tracing::debug!(data = %mask::secure_lines(body), "Transaction query response");
    let fields = lines::parse(body)?;
    let value = serde_json::to_value(fields)?;
    serde_json::from_value(value).map_err(|e| Error::Mapping(format!("transaction query: {e}")))
}
