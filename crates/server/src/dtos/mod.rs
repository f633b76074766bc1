pub mod referral_dto;
