//! 统一响应信封
//!
//! 服务端部分接口使用 `{ success, data, message }` 包装，部分直接返回资源本身。
//! 客户端对外只暴露一种结果类型，信封仅作为线上格式使用。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 线上信封格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

impl Envelope<Value> {
    /// 失败信封：`data` 固定为空对象
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Object(Default::default()),
            message: Some(message.into()),
        }
    }

    /// 判断任意 JSON 是否是信封：必须是带布尔 `success` 字段的对象
    pub fn detect(value: &Value) -> bool {
        value
            .as_object()
            .and_then(|obj| obj.get("success"))
            .is_some_and(Value::is_boolean)
    }
}

/// 非 2xx 响应体中可能携带的错误信息
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_shape() {
        let env = Envelope::failure("not found");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": false, "data": {}, "message": "not found" })
        );
    }

    #[test]
    fn test_ok_omits_message() {
        let env = Envelope::ok(json!([1, 2]));
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": true, "data": [1, 2] })
        );
    }

    #[test]
    fn test_detect() {
        assert!(Envelope::detect(&json!({ "success": true, "data": 1 })));
        assert!(Envelope::detect(&json!({ "success": false })));
        assert!(!Envelope::detect(&json!({ "success": "yes" })));
        assert!(!Envelope::detect(&json!([{ "success": true }])));
        assert!(!Envelope::detect(&json!({ "id": "1" })));
    }
}
