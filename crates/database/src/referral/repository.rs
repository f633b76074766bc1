use crate::{
    referral::model::{NewReferral, Referral},
    Database,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    error::{ErrorKind, WriteFailure},
    options::{Collation, CollationStrength, FindOneOptions},
};
use std::sync::Arc;
use tracing::debug;
use utils::{AppError, AppResult};

pub type DynReferralRepository = Arc<dyn ReferralRepositoryTrait + Send + Sync>;

pub const DUPLICATE_TITLE: &str = "Duplicate referral title";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 标题比较使用的排序规则：忽略大小写和重音
pub fn title_collation() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}

pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

fn map_write_error(err: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&err) {
        AppError::Conflict(DUPLICATE_TITLE.to_string())
    } else {
        AppError::MongoError(err)
    }
}

#[async_trait]
pub trait ReferralRepositoryTrait {
    /// 按存储自然顺序返回全部推荐记录
    async fn find_all(&self) -> AppResult<Vec<Referral>>;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Referral>>;

    /// 按标题查找（忽略大小写）
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Referral>>;

    /// 插入新记录，返回 None 表示数据库没有生成记录
    async fn create(&self, referral: NewReferral) -> AppResult<Option<ObjectId>>;

    /// 整体覆盖已有记录
    async fn save(&self, referral: Referral) -> AppResult<Referral>;

    /// 删除记录，返回是否确实删除
    async fn delete_one(&self, id: &ObjectId) -> AppResult<bool>;
}

#[async_trait]
impl ReferralRepositoryTrait for Database {
    async fn find_all(&self) -> AppResult<Vec<Referral>> {
        let cursor = self.referrals.find(None, None).await?;
        let referrals: Vec<Referral> = cursor.try_collect().await?;

        Ok(referrals)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Referral>> {
        let referral = self.referrals.find_one(doc! { "_id": *id }, None).await?;

        Ok(referral)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Referral>> {
        let options = FindOneOptions::builder().collation(title_collation()).build();
        let referral = self
            .referrals
            .find_one(doc! { "title": title }, options)
            .await?;

        Ok(referral)
    }

    async fn create(&self, referral: NewReferral) -> AppResult<Option<ObjectId>> {
        let new_doc = referral.into_referral(DateTime::now());

        let result = self
            .referrals
            .insert_one(new_doc, None)
            .await
            .map_err(map_write_error)?;

        debug!("referral inserted: {:?}", result.inserted_id);
        Ok(result.inserted_id.as_object_id())
    }

    async fn save(&self, mut referral: Referral) -> AppResult<Referral> {
        let id = referral.id.ok_or_else(|| {
            AppError::InternalServerErrorWithContext("cannot save a referral without _id".to_string())
        })?;
        referral.updated_at = Some(DateTime::now());

        let result = self
            .referrals
            .replace_one(doc! { "_id": id }, &referral, None)
            .await
            .map_err(map_write_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Referral not found".to_string()));
        }

        Ok(referral)
    }

    async fn delete_one(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.referrals.delete_one(doc! { "_id": *id }, None).await?;

        Ok(result.deleted_count > 0)
    }
}
