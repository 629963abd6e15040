use std::fmt::Display;

/// Wallet or QR scheme behind a point-of-sale payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfflineChannel {
    Alipay,
    TouchNGo,
    Boost,
    MaybankQrPay,
    GrabPay,
    UnionPay,
    ShopeePay,
    Other,
    Atome,
    WeChatPayCn,
    WeChatPayMy,
}

/// Channel ids reported in `channelId`. Alipay is issued under several ids.
pub const OFFLINE_CHANNELS: [(u16, OfflineChannel); 13] = [
    (16, OfflineChannel::Alipay),
    (17, OfflineChannel::TouchNGo),
    (18, OfflineChannel::Alipay),
    (19, OfflineChannel::Boost),
    (20, OfflineChannel::MaybankQrPay),
    (21, OfflineChannel::GrabPay),
    (22, OfflineChannel::UnionPay),
    (23, OfflineChannel::ShopeePay),
    (24, OfflineChannel::Other),
    (25, OfflineChannel::Alipay),
    (26, OfflineChannel::Atome),
    (36, OfflineChannel::WeChatPayCn),
    (37, OfflineChannel::WeChatPayMy),
];

impl OfflineChannel {
    pub fn from_id(id: u16) -> Option<Self> {
        OFFLINE_CHANNELS
            .iter()
            .find(|(code, _)| *code == id)
            .map(|(_, channel)| *channel)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok().and_then(Self::from_id)
    }

    /// Name used by the provider's reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Alipay => "ALIPAY",
            Self::TouchNGo => "TOUCHNGO",
            Self::Boost => "BOOST",
            Self::MaybankQrPay => "MAYBANKQRPAY",
            Self::GrabPay => "GRABPAY",
            Self::UnionPay => "UNIONPAY",
            Self::ShopeePay => "SHOPEEPAY",
            Self::Other => "OTHER",
            Self::Atome => "ATOME",
            Self::WeChatPayCn => "WECHATPAY (CN)",
            Self::WeChatPayMy => "WECHATPAY (MY)",
        }
    }
}

impl Display for OfflineChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
