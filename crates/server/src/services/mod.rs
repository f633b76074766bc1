pub mod referral;

use database::{referral::repository::DynReferralRepository, user::repository::DynUserRepository, Database};
use referral::{DynReferralService, ReferralService};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Services {
    pub referral: DynReferralService,
}

impl Services {
    pub fn new(db: Database) -> Self {
        let database = Arc::new(db);
        let services = Self::from_repositories(database.clone(), database);

        info!("🧠 services initialized");
        services
    }

    /// 用任意仓库实现组装服务（测试时使用内存仓库）
    pub fn from_repositories(referrals: DynReferralRepository, users: DynUserRepository) -> Self {
        let referral = Arc::new(ReferralService::new(referrals, users)) as DynReferralService;

        Self { referral }
    }
}
