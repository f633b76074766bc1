use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 用户模型（集合: users），本服务只读
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
