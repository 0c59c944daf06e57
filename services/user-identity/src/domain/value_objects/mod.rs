//! 值对象

mod mpin;
mod otp;
mod phone_number;

pub use mpin::{HashedMpin, Mpin};
pub use otp::{OtpCode, OtpKind};
pub use phone_number::PhoneNumber;
