use async_trait::async_trait;
use database::{
    referral::{
        model::{NewReferral, Referral},
        repository::{ReferralRepositoryTrait, DUPLICATE_TITLE},
    },
    user::{model::User, repository::UserRepositoryTrait},
};
use mongodb::bson::{oid::ObjectId, DateTime};
use std::sync::{Arc, Mutex};
use utils::{AppError, AppResult};

use crate::services::Services;

/// 内存版存储，标题按小写比较，插入时模拟唯一索引
#[derive(Default)]
pub struct InMemoryStore {
    referrals: Mutex<Vec<Referral>>,
    users: Mutex<Vec<User>>,
}

fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl InMemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, username: &str) -> ObjectId {
        let id = ObjectId::new();
        self.users.lock().expect("store poisoned").push(User {
            id: Some(id),
            username: username.to_string(),
            roles: vec!["Employee".to_string()],
        });
        id
    }

    pub fn referrals(&self) -> Vec<Referral> {
        self.referrals.lock().expect("store poisoned").clone()
    }

    pub fn services(self: &Arc<Self>) -> Services {
        Services::from_repositories(self.clone(), self.clone())
    }
}

#[async_trait]
impl ReferralRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Referral>> {
        Ok(self.referrals())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Referral>> {
        let guard = self.referrals.lock().expect("store poisoned");
        Ok(guard.iter().find(|r| r.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Referral>> {
        let guard = self.referrals.lock().expect("store poisoned");
        Ok(guard.iter().find(|r| same_title(&r.title, title)).cloned())
    }

    async fn create(&self, referral: NewReferral) -> AppResult<Option<ObjectId>> {
        let mut guard = self.referrals.lock().expect("store poisoned");
        if guard.iter().any(|r| same_title(&r.title, &referral.title)) {
            return Err(AppError::Conflict(DUPLICATE_TITLE.to_string()));
        }

        let id = ObjectId::new();
        let mut doc = referral.into_referral(DateTime::now());
        doc.id = Some(id);
        guard.push(doc);
        Ok(Some(id))
    }

    async fn save(&self, referral: Referral) -> AppResult<Referral> {
        let mut guard = self.referrals.lock().expect("store poisoned");
        let slot = guard
            .iter_mut()
            .find(|r| r.id == referral.id)
            .ok_or_else(|| AppError::NotFound("Referral not found".to_string()))?;
        *slot = referral.clone();
        Ok(referral)
    }

    async fn delete_one(&self, id: &ObjectId) -> AppResult<bool> {
        let mut guard = self.referrals.lock().expect("store poisoned");
        let before = guard.len();
        guard.retain(|r| r.id.as_ref() != Some(id));
        Ok(guard.len() < before)
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let guard = self.users.lock().expect("store poisoned");
        Ok(guard.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }
}
