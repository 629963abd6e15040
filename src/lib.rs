//! Client for Razer Merchant Services (RMS).
//!
//! This crate is split in 2 facades:
//!
//! - [online] (e-commerce channels, reports, refunds and webhook verification)
//! - [offline] (point-of-sale QR payments)
//!
//! Both share the [transport] layer and the [sign] primitives.
#![doc = include_str!("../README.md")]

pub mod config;
mod de;
pub mod error;
/// Signature masking for logs
pub mod mask;
/// Point-of-sale API
pub mod offline;
/// E-commerce API
pub mod online;
pub mod sign;
pub mod transport;

pub use config::{OfflineConfig, OnlineConfig, Secret};
pub use error::{Error, Result};
pub use offline::OfflineClient;
pub use online::OnlineClient;
