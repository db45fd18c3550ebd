//! Staking arithmetic
//!
//! Stake bounds, payout and fee math, and the duration choices offered when
//! staking on a challenge.

use crate::domain::{DomainError, DomainResult};

/// Smallest accepted stake
pub const MIN_STAKE: f64 = 1.0;
/// Largest accepted stake
pub const MAX_STAKE: f64 = 50.0;
/// Successful participants are paid `stake * PAYOUT_MULTIPLIER`
pub const PAYOUT_MULTIPLIER: f64 = 1.2;
/// Share of each stake kept by the platform
pub const PLATFORM_FEE_RATE: f64 = 0.05;
/// Success bonus never exceeds this share of the participant's stake
pub const BONUS_CAP_RATE: f64 = 0.5;

/// Quick-pick durations in minutes
pub const DURATION_PRESETS: [u32; 4] = [30, 60, 120, 240];
pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;
pub const DURATION_STEP_MINUTES: u32 = 15;

/// Check that a stake lies within [MIN_STAKE, MAX_STAKE]
pub fn validate_stake_amount(amount: f64) -> DomainResult<()> {
    if !amount.is_finite() {
        return Err(DomainError::InvalidStake(
            "Stake must be a number".to_string(),
        ));
    }
    if amount < MIN_STAKE {
        return Err(DomainError::InvalidStake(format!(
            "Minimum stake is ${}",
            MIN_STAKE
        )));
    }
    if amount > MAX_STAKE {
        return Err(DomainError::InvalidStake(format!(
            "Maximum stake is ${}",
            MAX_STAKE
        )));
    }
    Ok(())
}

/// Clamp a stake into the accepted range. Non-finite input becomes the minimum.
pub fn clamp_stake(amount: f64) -> f64 {
    if amount.is_nan() {
        return MIN_STAKE;
    }
    amount.clamp(MIN_STAKE, MAX_STAKE)
}

/// Amount paid out for a resolved stake
pub fn payout_for(stake: f64, success: bool) -> f64 {
    if success {
        stake * PAYOUT_MULTIPLIER
    } else {
        0.0
    }
}

pub fn platform_fee(stake: f64) -> f64 {
    stake * PLATFORM_FEE_RATE
}

/// Share of the failure pool a successful participant receives, capped at
/// half of their own stake.
pub fn success_bonus(stake: f64, failure_pool: f64, success_count: u32) -> f64 {
    if success_count == 0 {
        return 0.0;
    }
    let share = failure_pool / success_count as f64;
    share.min(stake * BONUS_CAP_RATE)
}

pub fn validate_duration_minutes(minutes: u32) -> DomainResult<()> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(DomainError::InvalidDuration(format!(
            "duration must be between {} and {} minutes",
            MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
        )));
    }
    if minutes % DURATION_STEP_MINUTES != 0 {
        return Err(DomainError::InvalidDuration(format!(
            "duration must be a multiple of {} minutes",
            DURATION_STEP_MINUTES
        )));
    }
    Ok(())
}

/// Snap to the nearest slider step inside the allowed range
pub fn clamp_duration_minutes(minutes: u32) -> u32 {
    let clamped = minutes.clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);
    let steps = (clamped + DURATION_STEP_MINUTES / 2) / DURATION_STEP_MINUTES;
    (steps * DURATION_STEP_MINUTES).clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
}

/// Human-readable duration: "45m", "2h", "1h 30m"
pub fn format_duration_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_bounds() {
        assert!(validate_stake_amount(1.0).is_ok());
        assert!(validate_stake_amount(50.0).is_ok());

        let err = validate_stake_amount(0.5).unwrap_err();
        assert_eq!(err.to_string(), "Minimum stake is $1");

        let err = validate_stake_amount(75.0).unwrap_err();
        assert_eq!(err.to_string(), "Maximum stake is $50");

        assert!(validate_stake_amount(f64::NAN).is_err());
    }

    #[test]
    fn test_clamp_stake() {
        assert_eq!(clamp_stake(0.0), 1.0);
        assert_eq!(clamp_stake(12.5), 12.5);
        assert_eq!(clamp_stake(500.0), 50.0);
        assert_eq!(clamp_stake(f64::NAN), 1.0);
    }

    #[test]
    fn test_payout_and_fee() {
        assert!((payout_for(10.0, true) - 12.0).abs() < 1e-9);
        assert_eq!(payout_for(10.0, false), 0.0);
        assert!((platform_fee(20.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_success_bonus_is_capped() {
        assert_eq!(success_bonus(10.0, 100.0, 0), 0.0);
        // 100 / 4 = 25, capped at 5
        assert_eq!(success_bonus(10.0, 100.0, 4), 5.0);
        // 12 / 4 = 3, under the cap
        assert_eq!(success_bonus(10.0, 12.0, 4), 3.0);
    }

    #[test]
    fn test_duration_rules() {
        for preset in DURATION_PRESETS {
            assert!(validate_duration_minutes(preset).is_ok());
        }
        assert!(validate_duration_minutes(10).is_err());
        assert!(validate_duration_minutes(500).is_err());
        assert!(validate_duration_minutes(50).is_err());

        assert_eq!(clamp_duration_minutes(0), 15);
        assert_eq!(clamp_duration_minutes(52), 45);
        assert_eq!(clamp_duration_minutes(53), 60);
        assert_eq!(clamp_duration_minutes(1000), 480);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_minutes(45), "45m");
        assert_eq!(format_duration_minutes(90), "1h 30m");
        assert_eq!(format_duration_minutes(120), "2h");
    }
}
