use crate::{
    auth::AuthUser,
    dtos::referral_dto::{
        CreateReferralDto, DeleteReferralDto, MessageResponse, ReferralResponse, UpdateReferralDto,
    },
    extractors::validation_extractor::ValidationExtractor,
    services::Services,
};
use axum::{http::StatusCode, routing::get, Extension, Json, Router};
use tracing::info;
use utils::AppResult;

/// 获取全部推荐记录（附带用户名）
#[utoipa::path(
    get,
    path = "/referrals",
    tag = "referral",
    responses(
        (status = 200, description = "推荐记录列表", body = Vec<ReferralResponse>),
        (status = 400, description = "没有任何推荐记录", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_all_referrals(Extension(services): Extension<Services>) -> AppResult<Json<Vec<ReferralResponse>>> {
    let referrals = services.referral.list().await?;

    Ok(Json(referrals))
}

/// 创建推荐记录
#[utoipa::path(
    post,
    path = "/referrals",
    tag = "referral",
    request_body = CreateReferralDto,
    responses(
        (status = 201, description = "创建成功", body = MessageResponse),
        (status = 400, description = "缺少字段或数据无效", body = MessageResponse),
        (status = 409, description = "标题重复", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_new_referral(
    Extension(services): Extension<Services>,
    Extension(auth_user): Extension<AuthUser>,
    ValidationExtractor(req): ValidationExtractor<CreateReferralDto>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let created = services.referral.create(req.into_new_referral()?).await?;
    info!("referral {} created by {}", created.id, auth_user.username);

    Ok((StatusCode::CREATED, Json(MessageResponse::new("New referral created"))))
}

/// 更新推荐记录
#[utoipa::path(
    patch,
    path = "/referrals",
    tag = "referral",
    request_body = UpdateReferralDto,
    responses(
        (status = 200, description = "更新成功", body = String),
        (status = 400, description = "缺少字段或记录不存在", body = MessageResponse),
        (status = 409, description = "标题重复", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_referral(
    Extension(services): Extension<Services>,
    Extension(auth_user): Extension<AuthUser>,
    ValidationExtractor(req): ValidationExtractor<UpdateReferralDto>,
) -> AppResult<Json<String>> {
    let reply = services.referral.update(req.into_update()?).await?;
    info!("{} by {}", reply, auth_user.username);

    Ok(Json(reply))
}

/// 删除推荐记录
#[utoipa::path(
    delete,
    path = "/referrals",
    tag = "referral",
    request_body = DeleteReferralDto,
    responses(
        (status = 200, description = "删除成功", body = String),
        (status = 400, description = "缺少ID或记录不存在", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_referral(
    Extension(services): Extension<Services>,
    Extension(auth_user): Extension<AuthUser>,
    ValidationExtractor(req): ValidationExtractor<DeleteReferralDto>,
) -> AppResult<Json<String>> {
    let reply = services.referral.delete(req.into_id()?).await?;
    info!("{} by {}", reply, auth_user.username);

    Ok(Json(reply))
}

pub struct ReferralController;
impl ReferralController {
    pub fn app() -> Router {
        Router::new().route(
            "/",
            get(get_all_referrals)
                .post(create_new_referral)
                .patch(update_referral)
                .delete(delete_referral),
        )
    }
}
