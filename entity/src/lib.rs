pub mod account;
pub mod reward_event;
pub mod session;
pub mod verification_code;
pub mod withdrawal;
