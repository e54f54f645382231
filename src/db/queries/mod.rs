pub mod accounts;
pub mod reward_events;
pub mod verification_codes;
pub mod withdrawals;
