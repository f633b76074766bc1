use crate::{user::model::User, Database};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;
use utils::AppResult;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;
}

#[async_trait]
impl UserRepositoryTrait for Database {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let user = self.users.find_one(doc! { "_id": *id }, None).await?;

        Ok(user)
    }
}
