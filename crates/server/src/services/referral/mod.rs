pub mod referral_service;


pub use referral_service::{DynReferralService, ReferralCreated, ReferralService, ReferralServiceTrait};
