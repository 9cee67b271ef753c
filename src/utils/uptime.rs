//! Human-readable uptime formatting.

use chrono::TimeDelta;
use std::time::Duration;

/// Formats `elapsed` as `"{days}d {hours}h {minutes}m"`, dropping seconds.
///
/// # Examples
///
/// ```
/// use domain_checker::utils::uptime::format_uptime;
/// use std::time::Duration;
///
/// assert_eq!(format_uptime(Duration::from_secs(95_640)), "1d 2h 34m");
/// ```
pub fn format_uptime(elapsed: Duration) -> String {
    let delta = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX);

    let days = delta.num_days();
    let hours = delta.num_hours() - days * 24;
    let minutes = delta.num_minutes() - delta.num_hours() * 60;

    format!("{days}d {hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::ZERO), "0d 0h 0m");
        assert_eq!(format_uptime(Duration::from_secs(59)), "0d 0h 0m");
        assert_eq!(format_uptime(Duration::from_secs(3_660)), "0d 1h 1m");
        assert_eq!(format_uptime(Duration::from_secs(2 * 86_400 + 5 * 60)), "2d 0h 5m");
    }
}
