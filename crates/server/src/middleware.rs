use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::info;

/// 请求日志中间件
/// 记录每个HTTP请求的IP地址、方法、路径、状态和耗时
pub async fn request_logger(connect_info: Option<ConnectInfo<SocketAddr>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        "📍 {} | {} {} | {} | {:.2}ms",
        client_ip,
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    response
}
