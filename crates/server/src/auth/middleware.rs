use crate::auth::{AuthConfig, AuthUser, JwtManager, TokenExtractor};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};
use utils::AppError;

/// 认证中间件状态
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: Arc<JwtManager>,
    pub auth_config: Arc<AuthConfig>,
}

impl AuthState {
    pub fn new(jwt_manager: JwtManager, auth_config: AuthConfig) -> Self {
        Self {
            jwt_manager: Arc::new(jwt_manager),
            auth_config: Arc::new(auth_config),
        }
    }
}

/// JWT认证中间件：缺少令牌返回 401，令牌无效或过期返回 403
pub async fn jwt_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if auth_state.auth_config.auth_disabled {
        debug!("🔓 auth disabled, continuing as anonymous");
        request.extensions_mut().insert(AuthUser::anonymous());
        return Ok(next.run(request).await);
    }

    let header = request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = TokenExtractor::extract_bearer_token(header).ok_or_else(|| {
        warn!("No authentication token provided");
        AppError::Unauthorized("Unauthorized".to_string())
    })?;

    let claims = auth_state.jwt_manager.verify_token(&token).map_err(|e| {
        warn!("Token verification failed: {}", e);
        AppError::Forbidden("Forbidden".to_string())
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}
