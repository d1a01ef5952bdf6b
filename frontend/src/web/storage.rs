//! LocalStorage 封装模块
//!
//! 读取失败一律视为"没有值"；写入和删除返回失败原因，由调用方决定是否记录。

/// 写入或删除失败的原因
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// 没有 window 或 localStorage（隐私模式、非浏览器环境）
    Unavailable,
    /// 浏览器拒绝了操作（配额、安全策略）
    Rejected(String),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "localStorage is unavailable"),
            StorageError::Rejected(msg) => {
                write!(f, "localStorage rejected the operation: {}", msg)
            }
        }
    }
}

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    pub fn get(key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }

    pub fn delete(key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_cause() {
        assert_eq!(
            StorageError::Unavailable.to_string(),
            "localStorage is unavailable"
        );
        assert_eq!(
            StorageError::Rejected("QuotaExceededError".into()).to_string(),
            "localStorage rejected the operation: QuotaExceededError"
        );
    }
}
