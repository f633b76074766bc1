use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 推荐记录模型（集合: referrals）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Referral {
    /// MongoDB文档ID，创建时由数据库分配
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 所属用户
    pub user: ObjectId,
    /// 标题，按 en/strength 2 排序规则唯一
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// 新建推荐记录的输入，completed 固定为 false
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReferral {
    pub user: ObjectId,
    pub title: String,
    pub text: String,
}

impl NewReferral {
    pub fn into_referral(self, now: DateTime) -> Referral {
        Referral {
            id: None,
            user: self.user,
            title: self.title,
            text: self.text,
            completed: false,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn new_referral_starts_incomplete() {
        let now = DateTime::now();
        let referral = NewReferral {
            user: ObjectId::new(),
            title: "Rust Book".to_string(),
            text: "read it".to_string(),
        }
        .into_referral(now);

        assert!(!referral.completed);
        assert_eq!(referral.id, None);
        assert_eq!(referral.created_at, Some(now));
    }

    #[test]
    fn serializes_with_store_field_names() {
        let referral = NewReferral {
            user: ObjectId::new(),
            title: "A".to_string(),
            text: "t".to_string(),
        }
        .into_referral(DateTime::now());

        let document = bson::to_document(&referral).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(document.contains_key("createdAt"));
        assert!(document.contains_key("updatedAt"));
        assert_eq!(document.get_bool("completed").unwrap(), false);
    }

    #[test]
    fn completed_defaults_when_missing() {
        let user = ObjectId::new();
        let referral: Referral = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "user": user,
            "title": "A",
            "text": "t",
        })
        .unwrap();

        assert!(!referral.completed);
        assert_eq!(referral.user, user);
        assert_eq!(referral.created_at, None);
    }
}
