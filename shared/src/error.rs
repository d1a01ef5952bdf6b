use thiserror::Error;

// =========================================================
// 客户端错误类型
// =========================================================

/// REST 客户端错误
///
/// 只区分三类：鉴权失败（由会话上下文统一处理）、客户端校验失败、其它请求失败。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 401 / 403：令牌无效或过期
    #[error("unauthorized (status {status})")]
    Unauthorized { status: u16 },

    /// 其它非 2xx 响应，`message` 取后端的 `detail` 字段
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// 网络层失败（请求未得到响应）
    #[error("network error: {0}")]
    Network(String),

    /// 响应体无法解析
    #[error("invalid response body: {0}")]
    Decode(String),

    /// 客户端校验失败，请求未发送
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// 由 HTTP 状态码和响应体构造错误
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 || status == 403 {
            return ApiError::Unauthorized { status };
        }
        ApiError::Status {
            status,
            message: detail_message(body),
        }
    }

    /// 面向用户的简短描述
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => {
                "Your session has expired. Please sign in again.".into()
            }
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Validation(message) => message.clone(),
            _ => "Something went wrong. Please try again.".into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 提取 FastAPI 风格错误体中的信息
///
/// `detail` 为字符串时直接使用；422 校验错误的 `detail` 是数组，取每项的 `msg`。
fn detail_message(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        });
    detail.unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_unauthorized() {
        assert_eq!(
            ApiError::from_status(401, ""),
            ApiError::Unauthorized { status: 401 }
        );
        assert!(ApiError::from_status(403, "{}").is_unauthorized());
        assert!(!ApiError::from_status(404, "").is_unauthorized());
    }

    #[test]
    fn test_status_message_prefers_detail() {
        let err = ApiError::from_status(400, r#"{"detail": "Username already registered"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "Username already registered".into()
            }
        );
        assert_eq!(err.user_message(), "Username already registered");

        let err = ApiError::from_status(502, "Bad Gateway\n");
        assert_eq!(err.user_message(), "Bad Gateway");
    }

    #[test]
    fn test_validation_detail_list_uses_msgs() {
        let body = r#"{"detail":[
            {"loc":["body","email"],"msg":"field required","type":"value_error.missing"},
            {"loc":["body","password"],"msg":"ensure this value has at least 6 characters"}
        ]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(
            err.user_message(),
            "field required; ensure this value has at least 6 characters"
        );

        // 数组中没有 msg 时退回原始响应体
        let err = ApiError::from_status(422, r#"{"detail":[]}"#);
        assert_eq!(err.user_message(), r#"{"detail":[]}"#);
    }

    #[test]
    fn test_generic_user_message() {
        assert_eq!(
            ApiError::Network("offline".into()).user_message(),
            "Something went wrong. Please try again."
        );
    }
}
