//! xplor-adapter-sms - 短信适配器
//!
//! 通过 Twilio Messages REST API 发送短信

mod client;

pub use client::*;
