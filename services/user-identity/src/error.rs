//! 身份服务错误类型

use thiserror::Error;
use xplor_errors::AppError;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Phone number should not be empty.")]
    EmptyPhoneNumber,

    #[error("Oops! It seems like the number you entered is invalid.")]
    InvalidPhoneNumber,

    #[error("Otp must be exactly 6 characters")]
    InvalidOtpFormat,

    #[error("Key is required")]
    MissingKey,

    #[error("MPIN must be of 6-digit number")]
    InvalidMpinFormat,

    #[error("User Not found")]
    UserNotFound,

    #[error("User with this phone number already exists")]
    PhoneNumberTaken,

    #[error("Verification attempts limit reached.")]
    AttemptsExhausted,

    /// OTP 不存在或已过期
    #[error("Invalid key or key is expired")]
    InvalidKey,

    /// MPIN 重置时的已验证 key 不存在或已过期
    #[error("Invalid key or key is expired")]
    VerifiedKeyExpired,

    #[error("The OTP you entered is incorrect. Please double-check the code sent to your mobile number and try again.")]
    IncorrectOtp,

    #[error("MPIN already created")]
    MpinAlreadyCreated,

    #[error("MPIN not set")]
    MpinNotSet,

    #[error("Incorrect MPIN. Please verify your entry and try again.")]
    IncorrectMpin,

    #[error("Invalid key for user")]
    KeyUserMismatch,

    #[error("MPIN not created")]
    MpinNotCreated,

    #[error("New MPIN must be different from the old MPIN")]
    MpinUnchanged,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token Missing")]
    TokenMissing,

    #[error("Invalid Token")]
    InvalidToken,

    #[error("Invalid role")]
    InvalidRole,

    #[error("Role not found")]
    RoleNotFound,

    #[error("Device preference already exist")]
    DevicePreferenceExists,

    #[error("Device preference not found")]
    DevicePreferenceNotFound,

    #[error("Language preference not found")]
    LanguagePreferenceNotFound,

    #[error("MPIN hashing failed: {0}")]
    Hashing(String),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        let message = err.to_string();
        match err {
            IdentityError::EmptyPhoneNumber
            | IdentityError::InvalidPhoneNumber
            | IdentityError::InvalidOtpFormat
            | IdentityError::MissingKey
            | IdentityError::InvalidMpinFormat => AppError::validation(message),

            IdentityError::InvalidKey | IdentityError::InvalidRole => {
                AppError::bad_request(message)
            }
            IdentityError::DevicePreferenceExists => AppError::bad_request(message),

            IdentityError::UserNotFound
            | IdentityError::RoleNotFound
            | IdentityError::DevicePreferenceNotFound
            | IdentityError::LanguagePreferenceNotFound => AppError::not_found(message),

            IdentityError::PhoneNumberTaken => AppError::conflict(message),

            IdentityError::AttemptsExhausted
            | IdentityError::VerifiedKeyExpired
            | IdentityError::MpinAlreadyCreated
            | IdentityError::KeyUserMismatch
            | IdentityError::MpinNotCreated
            | IdentityError::MpinUnchanged => AppError::forbidden(message),

            IdentityError::IncorrectOtp
            | IdentityError::MpinNotSet
            | IdentityError::IncorrectMpin
            | IdentityError::InvalidRefreshToken
            | IdentityError::RefreshTokenExpired
            | IdentityError::TokenMissing
            | IdentityError::InvalidToken => AppError::unauthorized(message),

            IdentityError::Hashing(_) => AppError::internal(message),
        }
    }
}
