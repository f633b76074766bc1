use crate::dtos::referral_dto::{ReferralResponse, ReferralUpdate, ALL_FIELDS_REQUIRED, INVALID_REFERRAL_DATA};
use async_trait::async_trait;
use database::{
    referral::{
        model::NewReferral,
        repository::{DynReferralRepository, DUPLICATE_TITLE},
    },
    user::repository::DynUserRepository,
};
use futures::future::try_join_all;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, warn};
use utils::{AppError, AppResult};

pub const NO_REFERRALS: &str = "No referrals found";
pub const REFERRAL_NOT_FOUND: &str = "Referral not found";

pub type DynReferralService = Arc<dyn ReferralServiceTrait + Send + Sync>;

/// 创建成功的回执
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferralCreated {
    pub id: ObjectId,
}

#[async_trait]
pub trait ReferralServiceTrait {
    /// 全部推荐记录，并发补全用户名，保持存储顺序
    async fn list(&self) -> AppResult<Vec<ReferralResponse>>;

    async fn create(&self, referral: NewReferral) -> AppResult<ReferralCreated>;

    /// 返回 "'<title>' updated"
    async fn update(&self, update: ReferralUpdate) -> AppResult<String>;

    /// 返回 "Referral '<title>' with ID <id> deleted"
    async fn delete(&self, id: ObjectId) -> AppResult<String>;
}

#[derive(Clone)]
pub struct ReferralService {
    referrals: DynReferralRepository,
    users: DynUserRepository,
}

impl ReferralService {
    pub fn new(referrals: DynReferralRepository, users: DynUserRepository) -> Self {
        Self { referrals, users }
    }

    fn ensure_present(values: &[&str]) -> AppResult<()> {
        if values.iter().any(|v| v.is_empty()) {
            return Err(AppError::BadRequest(ALL_FIELDS_REQUIRED.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReferralServiceTrait for ReferralService {
    async fn list(&self) -> AppResult<Vec<ReferralResponse>> {
        let referrals = self.referrals.find_all().await?;

        if referrals.is_empty() {
            return Err(AppError::NotFound(NO_REFERRALS.to_string()));
        }

        let users = &self.users;
        let lookups = referrals.into_iter().map(|referral| async move {
            let username = users.find_by_id(&referral.user).await?.map(|user| user.username);
            if username.is_none() {
                warn!("⚠️ owner {} of referral '{}' not found", referral.user, referral.title);
            }
            Ok::<_, AppError>(ReferralResponse::from_referral(referral, username))
        });

        try_join_all(lookups).await
    }

    async fn create(&self, referral: NewReferral) -> AppResult<ReferralCreated> {
        Self::ensure_present(&[&referral.title, &referral.text])?;

        if self.referrals.find_by_title(&referral.title).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_TITLE.to_string()));
        }

        let title = referral.title.clone();
        match self.referrals.create(referral).await? {
            Some(id) => {
                info!("✅ referral '{}' created with id {}", title, id);
                Ok(ReferralCreated { id })
            }
            None => Err(AppError::BadRequest(INVALID_REFERRAL_DATA.to_string())),
        }
    }

    async fn update(&self, update: ReferralUpdate) -> AppResult<String> {
        Self::ensure_present(&[&update.title, &update.text])?;

        let mut referral = self
            .referrals
            .find_by_id(&update.id)
            .await?
            .ok_or_else(|| AppError::NotFound(REFERRAL_NOT_FOUND.to_string()))?;

        // 允许保留或改写自身的标题
        if let Some(duplicate) = self.referrals.find_by_title(&update.title).await? {
            if duplicate.id != Some(update.id) {
                return Err(AppError::Conflict(DUPLICATE_TITLE.to_string()));
            }
        }

        referral.user = update.user;
        referral.title = update.title;
        referral.text = update.text;
        referral.completed = update.completed;

        let updated = self.referrals.save(referral).await?;
        info!("✅ referral {} updated", update.id);

        Ok(format!("'{}' updated", updated.title))
    }

    async fn delete(&self, id: ObjectId) -> AppResult<String> {
        let referral = self
            .referrals
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(REFERRAL_NOT_FOUND.to_string()))?;

        if !self.referrals.delete_one(&id).await? {
            return Err(AppError::NotFound(REFERRAL_NOT_FOUND.to_string()));
        }
        info!("🗑️ referral {} deleted", id);

        Ok(format!("Referral '{}' with ID {} deleted", referral.title, id))
    }
}
