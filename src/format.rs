//! Display formatting for amounts, addresses, counts and times

use chrono::{DateTime, Utc};

use crate::domain::Currency;

/// Group the integer part of a non-negative amount with commas
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{}", grouped, frac_part)
}

fn format_dollars(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-${}", group_thousands(-rounded))
    } else {
        format!("${}", group_thousands(rounded.abs()))
    }
}

/// "$1,234.56" for USD, "0.1234 ETH" for anything else
pub fn format_currency(amount: f64, currency: &str) -> String {
    if currency == "USD" {
        format_dollars(amount)
    } else {
        format!("{:.4} {}", amount, currency)
    }
}

/// Convert to USD at the currency's rate (1 when unknown) and format
pub fn format_usd(amount: f64, currency: &str) -> String {
    format_dollars(amount * Currency::usd_rate_for(currency))
}

pub fn format_crypto(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// "0x1234...7890"
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// "1.2M", "12.5K" or the plain number
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        format!("{}", num)
    }
}

pub fn format_time_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = end - now;
    if diff.num_milliseconds() <= 0 {
        return "Ended".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours() % 24;
    let minutes = diff.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - time;
    let days = diff.num_days();
    let hours = diff.num_hours();
    let minutes = diff.num_minutes();

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "Just now".to_string()
    }
}

/// 0.73 -> "73%"
pub fn format_percentage(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56, "USD"), "$1,234.56");
        assert_eq!(format_currency(1234567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_currency(0.5, "USD"), "$0.50");
        assert_eq!(format_currency(-1.0, "USD"), "-$1.00");
        assert_eq!(format_currency(2.5643, "ETH"), "2.5643 ETH");
    }

    #[test]
    fn test_format_usd_uses_rates() {
        assert_eq!(format_usd(2.0, "ETH"), "$4,800.00");
        assert_eq!(format_usd(10.0, "DOGE"), "$10.00");
    }

    #[test]
    fn test_format_address() {
        assert_eq!(
            format_address("0x1234567890123456789012345678901234567890"),
            "0x1234...7890"
        );
        assert_eq!(format_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_240_000.0), "1.2M");
        assert_eq!(format_number(12_500.0), "12.5K");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn test_time_formats() {
        let now = Utc::now();
        assert_eq!(format_time_remaining(now - Duration::minutes(1), now), "Ended");
        assert_eq!(
            format_time_remaining(now + Duration::hours(26) + Duration::minutes(5), now),
            "1d 2h"
        );
        assert_eq!(
            format_time_remaining(now + Duration::minutes(90), now),
            "1h 30m"
        );
        assert_eq!(format_time_remaining(now + Duration::minutes(7), now), "7m");

        assert_eq!(format_relative_time(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_relative_time(now - Duration::minutes(125), now), "2h ago");
        assert_eq!(format_relative_time(now - Duration::seconds(30), now), "Just now");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.73), "73%");
        assert_eq!(format_percentage(1.0), "100%");
    }
}
