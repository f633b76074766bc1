use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Referral API",
        description = "推荐记录增删改查接口（需 Bearer 令牌）",
        version = "1.0.0"
    ),
    paths(
        crate::api::health,
        crate::api::referral_controller::get_all_referrals,
        crate::api::referral_controller::create_new_referral,
        crate::api::referral_controller::update_referral,
        crate::api::referral_controller::delete_referral,
    ),
    components(
        schemas(
            crate::dtos::referral_dto::CreateReferralDto,
            crate::dtos::referral_dto::UpdateReferralDto,
            crate::dtos::referral_dto::DeleteReferralDto,
            crate::dtos::referral_dto::ReferralResponse,
            crate::dtos::referral_dto::MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "系统状态", description = "系统健康检查"),
        (name = "referral", description = "推荐记录管理")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}
