use crate::error::{Error, Result};

/// Shared key material. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

fn required(name: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::MissingField(name));
    }
    Ok(value)
}

/// Credentials of an online (e-commerce) merchant account
#[derive(Debug, Clone)]
pub struct OnlineConfig {
    pub(crate) merchant_id: String,
    pub(crate) verify_key: Secret,
    pub(crate) secret_key: Secret,
    pub(crate) callback_url: String,
}

impl OnlineConfig {
    pub fn new(
        merchant_id: impl Into<String>,
        verify_key: impl Into<String>,
        secret_key: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            merchant_id: required("merchantId", merchant_id.into())?,
            verify_key: Secret(required("verifyKey", verify_key.into())?),
            secret_key: Secret(required("secretKey", secret_key.into())?),
            callback_url: required("callbackUrl", callback_url.into())?,
        })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }
}

/// Credentials of a point-of-sale terminal
#[derive(Debug, Clone)]
pub struct OfflineConfig {
    pub(crate) store_id: String,
    pub(crate) application_code: String,
    pub(crate) secret_key: Secret,
    pub(crate) terminal_id: String,
}

impl OfflineConfig {
    pub fn new(
        store_id: impl Into<String>,
        application_code: impl Into<String>,
        secret_key: impl Into<String>,
        terminal_id: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            store_id: required("storeId", store_id.into())?,
            application_code: required("applicationCode", application_code.into())?,
            secret_key: Secret(required("secretKey", secret_key.into())?),
            terminal_id: required("terminalId", terminal_id.into())?,
        })
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn application_code(&self) -> &str {
        &self.application_code
    }

    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }
}
