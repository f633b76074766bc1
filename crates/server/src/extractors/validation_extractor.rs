use crate::dtos::referral_dto::INVALID_REFERRAL_DATA;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;
use utils::AppError;
use validator::Validate;

/// 解析 JSON 请求体并执行 `validator` 校验
///
/// 未声明 `Content-Type: application/json` 的请求按空对象 `{}` 处理，
/// 由 DTO 上配置的校验消息决定返回内容。
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationExtractor<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidationExtractor<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(JsonRejection::MissingJsonContentType(_)) => empty_body::<T>()?,
            Err(JsonRejection::JsonDataError(e)) => {
                warn!("⚠️ request body does not match the expected shape: {}", e.body_text());
                return Err(AppError::BadRequest(INVALID_REFERRAL_DATA.to_string()));
            }
            Err(rejection) => return Err(rejection.into()),
        };

        value.validate()?;
        Ok(ValidationExtractor(value))
    }
}

fn empty_body<T: DeserializeOwned>() -> Result<T, AppError> {
    serde_json::from_value(Value::Object(Map::new())).map_err(|e| {
        warn!("⚠️ empty request body rejected: {}", e);
        AppError::BadRequest(INVALID_REFERRAL_DATA.to_string())
    })
}
