//! Relative time formatting ("5 minutes ago").

use crate::display::plural;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describe how long before `now_secs` the timestamp `then_secs` was.
///
/// Both arguments are seconds since the Unix epoch. Timestamps in the
/// future (clock skew between server and browser) read as "just now".
pub fn time_ago(then_secs: i64, now_secs: i64) -> String {
    let diff = now_secs.saturating_sub(then_secs);

    if diff <= 0 {
        "just now".to_string()
    } else if diff < MINUTE {
        format!("{} ago", plural(diff, "second"))
    } else if diff < HOUR {
        format!("{} ago", plural(diff / MINUTE, "minute"))
    } else if diff < DAY {
        format!("{} ago", plural(diff / HOUR, "hour"))
    } else if diff < MONTH {
        format!("{} ago", plural(diff / DAY, "day"))
    } else if diff < YEAR {
        format!("{} ago", plural(diff / MONTH, "month"))
    } else {
        format!("{} ago", plural(diff / YEAR, "year"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_just_now() {
        assert_eq!(time_ago(NOW, NOW), "just now");
        assert_eq!(time_ago(NOW + 30, NOW), "just now");
    }

    #[test]
    fn test_buckets() {
        assert_eq!(time_ago(NOW - 1, NOW), "1 second ago");
        assert_eq!(time_ago(NOW - 59, NOW), "59 seconds ago");
        assert_eq!(time_ago(NOW - 60, NOW), "1 minute ago");
        assert_eq!(time_ago(NOW - 3 * 3600 - 5, NOW), "3 hours ago");
        assert_eq!(time_ago(NOW - 86_400, NOW), "1 day ago");
        assert_eq!(time_ago(NOW - 45 * 86_400, NOW), "1 month ago");
        assert_eq!(time_ago(NOW - 800 * 86_400, NOW), "2 years ago");
    }
}
