use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::de::flag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelType {
    #[serde(rename = "Internet Banking")]
    InternetBanking,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "E-Wallet")]
    EWallet,
    #[serde(rename = "Over The Counter")]
    OverTheCounter,
}

impl ChannelType {
    /// Unknown codes are not an error, new channel families appear without notice
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IB" => Some(Self::InternetBanking),
            "CC" => Some(Self::CreditCard),
            "EW" => Some(Self::EWallet),
            "OTC" => Some(Self::OverTheCounter),
            _ => None,
        }
    }
}

impl Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InternetBanking => f.write_str("Internet Banking"),
            Self::CreditCard => f.write_str("Credit Card"),
            Self::EWallet => f.write_str("E-Wallet"),
            Self::OverTheCounter => f.write_str("Over The Counter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelLogo {
    #[serde(rename = "16x16")]
    pub size_16: String,
    #[serde(rename = "24x24")]
    pub size_24: String,
    #[serde(rename = "32x32")]
    pub size_32: String,
    #[serde(rename = "48x48")]
    pub size_48: String,
    #[serde(rename = "120x43")]
    pub size_120x43: String,
}

/// Payment channel available to the merchant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub title: String,
    pub status: bool,
    pub can_apple_pay: bool,
    pub can_google_pay: bool,
    pub currency: Vec<String>,
    /// Channel code to submit with seamless payment requests
    pub channel: String,
    pub logo_url: ChannelLogo,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChannelType>,
}

/// Channel as listed by `channel_status.php`
#[derive(Debug, Deserialize)]
pub(crate) struct RawChannel {
    title: String,
    #[serde(deserialize_with = "flag")]
    status: bool,
    #[serde(deserialize_with = "flag")]
    applepay_enabled: bool,
    #[serde(deserialize_with = "flag")]
    googlepay_enabled: bool,
    currency: Vec<String>,
    logo_url_16x16: String,
    logo_url_24x24: String,
    logo_url_32x32: String,
    logo_url_48x48: String,
    logo_url_120x43: String,
    channel_map: ChannelMap,
    #[serde(default)]
    channel_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelMap {
    seamless: SeamlessMapping,
}

#[derive(Debug, Deserialize)]
struct SeamlessMapping {
    request: String,
}

impl From<RawChannel> for Channel {
    fn from(raw: RawChannel) -> Self {
        Self {
            kind: raw.channel_type.as_deref().and_then(ChannelType::from_code),
            title: raw.title,
            status: raw.status,
            can_apple_pay: raw.applepay_enabled,
            can_google_pay: raw.googlepay_enabled,
            currency: raw.currency,
            channel: raw.channel_map.seamless.request,
            logo_url: ChannelLogo {
                size_16: raw.logo_url_16x16,
                size_24: raw.logo_url_24x24,
                size_32: raw.logo_url_32x32,
                size_48: raw.logo_url_48x48,
                size_120x43: raw.logo_url_120x43,
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::{Value, json};

    use super::*;

    pub fn raw_channel(title: &str, status: Value, channel_type: Value) -> Value {
        json!({
            "title": title,
            "status": status,
            "applepay_enabled": "0",
            "googlepay_enabled": "1",
            "currency": ["MYR"],
            "logo_url_16x16": "https://cdn.test/16.png",
            "logo_url_24x24": "https://cdn.test/24.png",
            "logo_url_32x32": "https://cdn.test/32.png",
            "logo_url_48x48": "https://cdn.test/48.png",
            "logo_url_120x43": "https://cdn.test/120x43.png",
            "channel_map": {"seamless": {"request": "TNG-EWALLET", "response": "TNG-EWALLET"}},
            "channel_type": channel_type,
        })
    }

    #[test]
    fn maps_raw_channel() {
        let raw: RawChannel =
            serde_json::from_value(raw_channel("Touch n Go", json!("1"), json!("EW"))).unwrap();
        let channel = Channel::from(raw);
        assert_eq!(channel.title, "Touch n Go");
        assert!(channel.status);
        assert!(!channel.can_apple_pay);
        assert!(channel.can_google_pay);
        assert_eq!(channel.channel, "TNG-EWALLET");
        assert_eq!(channel.kind, Some(ChannelType::EWallet));
        assert_eq!(channel.logo_url.size_120x43, "https://cdn.test/120x43.png");
    }

    #[test]
    fn unknown_or_missing_type_is_none() {
        let raw: RawChannel =
            serde_json::from_value(raw_channel("BNPL", json!(0), json!("BNPL"))).unwrap();
        let channel = Channel::from(raw);
        assert!(!channel.status);
        assert_eq!(channel.kind, None);

        let mut value = raw_channel("BNPL", json!("0"), Value::Null);
        value.as_object_mut().unwrap().remove("channel_type");
        let raw: RawChannel = serde_json::from_value(value).unwrap();
        assert_eq!(Channel::from(raw).kind, None);
    }

    #[test]
    fn type_codes() {
        assert_eq!(ChannelType::from_code("IB"), Some(ChannelType::InternetBanking));
        assert_eq!(ChannelType::from_code("CC"), Some(ChannelType::CreditCard));
        assert_eq!(ChannelType::from_code("OTC"), Some(ChannelType::OverTheCounter));
        assert_eq!(ChannelType::from_code("ib"), None);
        assert_eq!(ChannelType::CreditCard.to_string(), "Credit Card");
    }

    #[test]
    fn serializes_with_provider_names() {
        let raw: RawChannel =
            serde_json::from_value(raw_channel("Visa", json!(true), json!("CC"))).unwrap();
        let value = serde_json::to_value(Channel::from(raw)).unwrap();
        assert_eq!(value["canGooglePay"], true);
        assert_eq!(value["type"], "Credit Card");
        assert_eq!(value["logoUrl"]["16x16"], "https://cdn.test/16.png");
    }
}
