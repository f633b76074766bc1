use crate::auth::models::{AuthConfig, Claims, UserInfo};
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// JWT令牌管理器
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: AuthConfig,
}

impl JwtManager {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    /// 生成访问令牌
    pub fn generate_token(&self, username: &str, roles: Vec<String>) -> Result<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expires_in_hours as i64);

        self.sign(&Claims {
            user_info: UserInfo {
                username: username.to_string(),
                roles,
            },
            exp: expires_at.timestamp() as u64,
            iat: now.timestamp() as u64,
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| anyhow!("Failed to generate JWT token: {}", e))
    }

    /// 验证令牌，过期由 jsonwebtoken 的默认校验处理
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| anyhow!("Invalid JWT token: {}", e))?;

        Ok(token_data.claims)
    }
}

/// JWT令牌提取器
pub struct TokenExtractor;

impl TokenExtractor {
    /// 从Authorization头部提取Bearer令牌
    pub fn extract_bearer_token(auth_header: Option<&str>) -> Option<String> {
        auth_header
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_only".to_string(),
            jwt_expires_in_hours: 1,
            auth_disabled: false,
        }
    }

    #[test]
    fn test_jwt_generation_and_verification() {
        let jwt_manager = JwtManager::new(create_test_config());

        let token = jwt_manager
            .generate_token("dave", vec!["Employee".to_string()])
            .unwrap();

        let claims = jwt_manager.verify_token(&token).unwrap();
        assert_eq!(claims.user_info.username, "dave");
        assert_eq!(claims.user_info.roles, vec!["Employee".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_manager = JwtManager::new(create_test_config());
        let issued = Utc::now().timestamp() as u64 - 7200;

        let token = jwt_manager
            .sign(&Claims {
                user_info: UserInfo {
                    username: "dave".to_string(),
                    roles: vec![],
                },
                exp: issued + 3600,
                iat: issued,
            })
            .unwrap();

        assert!(jwt_manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let mut other = create_test_config();
        other.jwt_secret = "another_secret".to_string();
        let token = JwtManager::new(other).generate_token("dave", vec![]).unwrap();

        assert!(JwtManager::new(create_test_config()).verify_token(&token).is_err());
        assert!(JwtManager::new(create_test_config()).verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let token = TokenExtractor::extract_bearer_token(Some("Bearer abc.def.ghi"));
        assert_eq!(token, Some("abc.def.ghi".to_string()));

        assert_eq!(TokenExtractor::extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(TokenExtractor::extract_bearer_token(Some("Bearer ")), None);
        assert_eq!(TokenExtractor::extract_bearer_token(None), None);
    }
}
