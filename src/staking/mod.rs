//! Staking
//!
//! - **rules**: stake bounds, payout and fee math, duration choices
//! - **active**: the countdown for a stake in progress and its result

pub mod active;
pub mod rules;

pub use active::{format_countdown, ActiveChallenge, ChallengeResult, Outcome, PoolStats, Urgency};
pub use rules::{
    clamp_duration_minutes, clamp_stake, format_duration_minutes, payout_for, platform_fee,
    success_bonus, validate_duration_minutes, validate_stake_amount, DURATION_PRESETS,
    MAX_DURATION_MINUTES, MAX_STAKE, MIN_DURATION_MINUTES, MIN_STAKE, PAYOUT_MULTIPLIER,
};
