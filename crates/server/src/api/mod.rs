pub mod referral_controller;


use crate::auth::{jwt_auth_middleware, AuthState};
use axum::{
    middleware,
    routing::{get, Router},
};

/// 系统健康检查
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "服务器运行正常", body = String)
    ),
    tag = "系统状态"
)]
pub async fn health() -> &'static str {
    "Server is running! 🚀"
}

pub fn app(auth_state: AuthState) -> Router {
    Router::new().route("/", get(health)).nest(
        "/referrals",
        referral_controller::ReferralController::app()
            .route_layer(middleware::from_fn_with_state(auth_state, jwt_auth_middleware)),
    )
}
