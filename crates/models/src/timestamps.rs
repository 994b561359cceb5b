use chrono::{Duration, SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

/// Current time at microsecond precision, matching what Postgres stores.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}

/// A fresh `updated_at` that is strictly later than `prev`, even when the
/// clock has not visibly moved since the previous write.
pub fn after(prev: &DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let now = now();
    if now > *prev {
        now
    } else {
        prev.trunc_subsecs(6) + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_is_strictly_later_even_for_future_prev() {
        let future = now() + Duration::seconds(5);
        let next = after(&future);
        assert!(next > future);
        let past = now() - Duration::seconds(5);
        assert!(after(&past) > past);
    }
}
