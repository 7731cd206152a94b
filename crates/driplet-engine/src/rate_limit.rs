// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rolling-window rate limiting for send requests.

use chrono::{DateTime, Duration, Utc};

/// Length of the rolling window a user's successes are counted over.
pub const WINDOW: Duration = Duration::hours(24);

/// Outcome of a rate-limit evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Denied until `retry_after`. The raw timestamp is returned; phrasing
    /// ("today after ...") is the transport's concern.
    Denied { retry_after: DateTime<Utc> },
}

/// Evaluates whether a user may start a new request.
///
/// `successes` must be the creation timestamps of the user's successful
/// requests of the same kind inside the window, oldest first (the shape
/// the store query returns). Once the oldest counted success ages out of
/// the window, capacity frees up, so `retry_after` is that success plus
/// the window length.
pub fn check(max_successes: u32, successes: &[DateTime<Utc>]) -> Decision {
    if successes.len() < max_successes as usize {
        Decision::Allowed
    } else {
        Decision::Denied {
            retry_after: successes[0] + WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, min, 0).unwrap()
    }

    #[test]
    fn under_the_limit_is_allowed() {
        assert_eq!(check(2, &[]), Decision::Allowed);
        assert_eq!(check(2, &[ts(9, 0)]), Decision::Allowed);
    }

    #[test]
    fn at_the_limit_is_denied_until_oldest_ages_out() {
        let oldest = ts(9, 0);
        let decision = check(2, &[oldest, ts(11, 30)]);
        assert_eq!(
            decision,
            Decision::Denied {
                retry_after: oldest + WINDOW,
            }
        );
    }

    #[test]
    fn over_the_limit_still_keys_off_the_oldest() {
        let oldest = ts(8, 15);
        let decision = check(2, &[oldest, ts(9, 0), ts(10, 0)]);
        assert_eq!(
            decision,
            Decision::Denied {
                retry_after: oldest + WINDOW,
            }
        );
    }

    #[test]
    fn limit_of_one_denies_after_single_success() {
        assert_eq!(check(1, &[]), Decision::Allowed);
        assert!(matches!(check(1, &[ts(12, 0)]), Decision::Denied { .. }));
    }
}
