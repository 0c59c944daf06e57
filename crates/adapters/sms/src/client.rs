//! Twilio 短信客户端实现

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};
use xplor_errors::{AppError, AppResult};
use xplor_ports::SmsPort;

/// Twilio: "The 'To' number is not a valid phone number"
const INVALID_TO_NUMBER: u32 = 21211;

/// Twilio 客户端配置
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: Secret<String>,
    pub sender_phone_number: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl TwilioConfig {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: Secret<String>,
        sender_phone_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token,
            sender_phone_number: sender_phone_number.into(),
            base_url: "https://api.twilio.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: Option<String>,
}

/// Twilio 短信客户端
pub struct TwilioSmsClient {
    config: TwilioConfig,
    http: Client,
}

impl TwilioSmsClient {
    pub fn new(config: TwilioConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

/// Twilio 错误码映射为客户端可见的错误
fn map_twilio_error(code: Option<u32>) -> AppError {
    match code {
        Some(INVALID_TO_NUMBER) => {
            AppError::bad_request("Failed to send OTP, Invalid phone number")
        }
        _ => AppError::external_service("Failed to send OTP"),
    }
}

#[async_trait]
impl SmsPort for TwilioSmsClient {
    async fn send_sms(&self, to: &str, body: &str) -> AppResult<()> {
        debug!(to = %to, "Sending SMS via Twilio");

        let form = [
            ("To", to),
            ("From", self.config.sender_phone_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Request to Twilio failed");
                AppError::external_service("Failed to send OTP")
            })?;

        let status = response.status();
        if status.is_success() {
            info!(to = %to, "SMS sent");
            return Ok(());
        }

        let body: Option<TwilioErrorBody> = response.json().await.ok();
        let code = body.as_ref().and_then(|b| b.code);
        error!(
            status = %status,
            code = ?code,
            message = ?body.as_ref().and_then(|b| b.message.as_deref()),
            "Twilio rejected message"
        );

        Err(map_twilio_error(code))
    }
}
