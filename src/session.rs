//! 会话访问
//!
//! 从 Token 的 payload 段解码出当前用户名。
//!
//! 注意：客户端不校验签名，解码结果只是界面提示（显示谁登录了、是否展示编辑按钮），
//! 不能作为授权依据。每个需要权限的接口都由服务端重新校验 Token。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Token payload 中客户端关心的声明
///
/// 各字段独立宽松解析：某个声明的类型不符只会让该字段为 None，
/// 不影响其余字段（尤其是 `sub`）。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub iat: Option<i64>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub exp: Option<i64>,
}

/// 只接受字符串，其余类型视为缺失
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// 秒级时间戳：接受整数、小数（截断）与数字字符串
fn lenient_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let as_seconds = |f: f64| f.is_finite().then_some(f as i64);
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(as_seconds)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(as_seconds))
        }
        _ => None,
    })
}

/// 解码 Token 的 payload 段
///
/// 兼容 URL-safe 与标准 base64 字母表，padding 可有可无。
/// 任何失败都只记录日志并返回 None。
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let Some(segment) = token.split('.').nth(1) else {
        log::warn!("token has no payload segment");
        return None;
    };

    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = match URL_SAFE_NO_PAD.decode(normalized.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("error decoding token payload: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<TokenClaims>(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::warn!("error parsing token payload: {}", e);
            None
        }
    }
}

/// 会话快照
///
/// 不单独存储，每次从 TokenStore 重新计算。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 是否已登录：仅判断 Token 是否存在
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 当前用户名（取自 `sub`，未登录或解码失败时为 None）
    pub fn current_username(&self) -> Option<String> {
        self.token
            .as_deref()
            .and_then(decode_claims)
            .and_then(|claims| claims.sub)
            .filter(|sub| !sub.is_empty())
    }
}
