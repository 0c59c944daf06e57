//! 短信发送 trait 定义

use async_trait::async_trait;
use xplor_errors::AppResult;

#[async_trait]
pub trait SmsPort: Send + Sync {
    /// 向 E.164 格式号码发送一条短信
    async fn send_sms(&self, to: &str, body: &str) -> AppResult<()>;
}
