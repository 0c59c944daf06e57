//! 通用工具函数

use uuid::Uuid;

/// 生成带类型前缀的文档 ID，例如 `role_3f2a...`
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}

/// 去掉字符串中的所有空格
pub fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_id() {
        let id = prefixed_id("device");
        assert!(id.starts_with("device_"));
        assert!(Uuid::parse_str(&id["device_".len()..]).is_ok());
    }

    #[test]
    fn test_strip_spaces() {
        assert_eq!(strip_spaces("+91 98765 43210"), "+919876543210");
    }
}
