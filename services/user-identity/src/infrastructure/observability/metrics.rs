//! 业务指标记录

use metrics::counter;

use crate::domain::value_objects::OtpKind;

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "mismatch" }
}

/// 记录 OTP 下发
pub fn record_otp_sent(kind: OtpKind) {
    counter!("otp_sent_total", "kind" => kind.as_str()).increment(1);
}

/// 记录 OTP 校验结果
pub fn record_otp_verification(kind: OtpKind, success: bool) {
    counter!(
        "otp_verified_total",
        "kind" => kind.as_str(),
        "outcome" => outcome(success)
    )
    .increment(1);
}

/// 记录 MPIN 校验结果
pub fn record_mpin_verification(success: bool) {
    counter!("mpin_verified_total", "outcome" => outcome(success)).increment(1);
}

/// 记录令牌签发
pub fn record_token_issued(kind: &'static str) {
    counter!("tokens_issued_total", "kind" => kind).increment(1);
}
