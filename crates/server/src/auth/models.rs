use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 令牌中携带的用户信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// JWT Claims 结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "UserInfo")]
    pub user_info: UserInfo,
    /// 过期时间
    pub exp: u64,
    /// 签发时间
    pub iat: u64,
}

/// 认证通过后放入请求扩展的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn anonymous() -> Self {
        Self {
            username: "anonymous".to_string(),
            roles: Vec::new(),
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.user_info.username,
            roles: claims.user_info.roles,
        }
    }
}

/// 认证配置
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expires_in_hours: u64,
    /// 认证开关：true时禁用认证，false时启用认证
    pub auth_disabled: bool,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret =
            std::env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET environment variable is required")?;

        Ok(Self {
            jwt_secret,
            jwt_expires_in_hours: std::env::var("JWT_EXPIRES_IN_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            auth_disabled: std::env::var("AUTH_DISABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}
