////////////////////////////////////////////////////////////////////////
//
// 1. 每个Domain(Entity)单独一个文件夹
// 2. 每个Domain由两部分组成:
//    - model: 定义Schema
//    - repository: 实际的数据库底层操作
//
//////////////////////////////////////////////////////////////////////

use mongodb::{options::IndexOptions, Client, Collection, IndexModel};
use std::sync::Arc;
use tracing::{info, warn};
use utils::{AppConfig, AppResult};

pub mod referral;
pub mod user;

use referral::{model::Referral, repository::title_collation};
use user::model::User;

#[derive(Clone, Debug)]
pub struct Database {
    pub referrals: Collection<Referral>,
    pub users: Collection<User>,
}

impl Database {
    pub async fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let db = client.database(&config.mongo_db);

        let referrals = db.collection("referrals");
        let users = db.collection("users");

        info!("🧱 database({:#}) connected.", &config.mongo_db);

        Ok(Database { referrals, users })
    }

    /// 初始化索引：标题在忽略大小写的排序规则下唯一
    pub async fn init_repository_indexes(&self) -> AppResult<()> {
        let title_index = IndexModel::builder()
            .keys(mongodb::bson::doc! { "title": 1 })
            .options(
                IndexOptions::builder()
                    .name("title_ci_unique".to_string())
                    .unique(true)
                    .collation(title_collation())
                    .build(),
            )
            .build();

        match self.referrals.create_index(title_index, None).await {
            Ok(result) => info!("✅ referral index ready: {}", result.index_name),
            // 已存在重复标题时建索引会失败
            Err(e) => warn!("⚠️ failed to create referral title index: {}", e),
        }

        Ok(())
    }
}
