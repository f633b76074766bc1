use chrono::{DateTime, Utc};
use database::referral::model::{NewReferral, Referral};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utils::{AppError, AppResult};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const ID_REQUIRED: &str = "Referral ID required";
pub const INVALID_REFERRAL_DATA: &str = "Invalid referral data received";
pub const INVALID_REFERRAL_ID: &str = "Invalid referral ID";

/// `completed` 必须是 JSON 布尔值，"true" 之类的字符串不接受
fn validate_strict_bool(value: &serde_json::Value) -> Result<(), ValidationError> {
    if value.is_boolean() {
        return Ok(());
    }

    let mut error = ValidationError::new("boolean");
    error.message = Some(Cow::from(ALL_FIELDS_REQUIRED));
    Err(error)
}

fn parse_object_id(value: &str, message: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(value).map_err(|_| AppError::BadRequest(message.to_string()))
}

fn required<T>(value: Option<T>, message: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// 创建推荐记录的请求体
#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
pub struct CreateReferralDto {
    /// 所属用户ID
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub user: Option<String>,
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub text: Option<String>,
}

impl CreateReferralDto {
    pub fn into_new_referral(self) -> AppResult<NewReferral> {
        let user = required(self.user, ALL_FIELDS_REQUIRED)?;

        Ok(NewReferral {
            user: parse_object_id(&user, INVALID_REFERRAL_DATA)?,
            title: required(self.title, ALL_FIELDS_REQUIRED)?,
            text: required(self.text, ALL_FIELDS_REQUIRED)?,
        })
    }
}

/// 更新推荐记录的请求体，四个可变字段全部覆盖
#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
pub struct UpdateReferralDto {
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub id: Option<String>,
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub user: Option<String>,
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub text: Option<String>,
    #[validate(required(message = "All fields are required"), custom = "validate_strict_bool")]
    #[schema(value_type = Option<bool>)]
    pub completed: Option<serde_json::Value>,
}

/// 经过校验的更新命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralUpdate {
    pub id: ObjectId,
    pub user: ObjectId,
    pub title: String,
    pub text: String,
    pub completed: bool,
}

impl UpdateReferralDto {
    pub fn into_update(self) -> AppResult<ReferralUpdate> {
        let id = required(self.id, ALL_FIELDS_REQUIRED)?;
        let user = required(self.user, ALL_FIELDS_REQUIRED)?;
        let completed = required(self.completed.and_then(|v| v.as_bool()), ALL_FIELDS_REQUIRED)?;

        Ok(ReferralUpdate {
            id: parse_object_id(&id, INVALID_REFERRAL_ID)?,
            user: parse_object_id(&user, INVALID_REFERRAL_DATA)?,
            title: required(self.title, ALL_FIELDS_REQUIRED)?,
            text: required(self.text, ALL_FIELDS_REQUIRED)?,
            completed,
        })
    }
}

/// 删除推荐记录的请求体
#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
pub struct DeleteReferralDto {
    #[validate(
        required(message = "Referral ID required"),
        length(min = 1, message = "Referral ID required")
    )]
    pub id: Option<String>,
}

impl DeleteReferralDto {
    pub fn into_id(self) -> AppResult<ObjectId> {
        let id = required(self.id, ID_REQUIRED)?;
        parse_object_id(&id, INVALID_REFERRAL_ID)
    }
}

/// 附带用户名的推荐记录
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct ReferralResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub title: String,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// 所属用户的用户名，用户已不存在时为 null
    pub username: Option<String>,
}

impl ReferralResponse {
    pub fn from_referral(referral: Referral, username: Option<String>) -> Self {
        Self {
            id: referral.id.map(|id| id.to_hex()).unwrap_or_default(),
            user: referral.user.to_hex(),
            title: referral.title,
            text: referral.text,
            completed: referral.completed,
            created_at: referral.created_at.map(|t| t.to_chrono()),
            updated_at: referral.updated_at.map(|t| t.to_chrono()),
            username,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_dto(completed: serde_json::Value) -> UpdateReferralDto {
        serde_json::from_value(json!({
            "id": ObjectId::new().to_hex(),
            "user": ObjectId::new().to_hex(),
            "title": "B",
            "text": "t",
            "completed": completed,
        }))
        .unwrap()
    }

    #[test]
    fn create_dto_rejects_missing_and_empty_fields() {
        let missing: CreateReferralDto = serde_json::from_value(json!({ "title": "A", "text": "t" })).unwrap();
        assert!(missing.validate().is_err());

        let empty: CreateReferralDto =
            serde_json::from_value(json!({ "user": ObjectId::new().to_hex(), "title": "", "text": "t" })).unwrap();
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn create_dto_rejects_malformed_user_id() {
        let dto: CreateReferralDto =
            serde_json::from_value(json!({ "user": "not-an-id", "title": "A", "text": "t" })).unwrap();
        assert!(dto.validate().is_ok());

        let err = dto.into_new_referral().unwrap_err();
        assert_eq!(err.message(), INVALID_REFERRAL_DATA);
    }

    #[test]
    fn update_dto_requires_strict_boolean() {
        assert!(update_dto(json!(true)).validate().is_ok());
        assert!(update_dto(json!(false)).validate().is_ok());

        let errors = update_dto(json!("true")).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("completed"));
        assert!(update_dto(json!(1)).validate().is_err());
        assert!(update_dto(serde_json::Value::Null).validate().is_err());
    }

    #[test]
    fn update_dto_converts_to_command() {
        let update = update_dto(json!(true)).into_update().unwrap();
        assert_eq!(update.title, "B");
        assert!(update.completed);
    }

    #[test]
    fn delete_dto_requires_id() {
        let dto = DeleteReferralDto::default();
        let errors = dto.validate().unwrap_err();
        let message = errors.field_errors()["id"][0].message.clone().unwrap();
        assert_eq!(message, ID_REQUIRED);
    }

    #[test]
    fn response_renders_store_fields_and_username() {
        let referral = NewReferral {
            user: ObjectId::new(),
            title: "A".to_string(),
            text: "t".to_string(),
        }
        .into_referral(mongodb::bson::DateTime::now());
        let id = ObjectId::new();
        let response = ReferralResponse::from_referral(
            Referral {
                id: Some(id),
                ..referral.clone()
            },
            Some("dave".to_string()),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["_id"], id.to_hex());
        assert_eq!(value["user"], referral.user.to_hex());
        assert_eq!(value["username"], "dave");
        assert_eq!(value["completed"], false);
        assert!(value.get("createdAt").is_some());
    }
}
