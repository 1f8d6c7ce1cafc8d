//! UTC calendar helpers over `Clock::unix_timestamp`.

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

/// Days since the unix epoch.
pub fn day_of(ts: i64) -> i64 {
    ts.div_euclid(SECONDS_PER_DAY)
}

/// Hour of day, 0..=23.
pub fn hour_of(ts: i64) -> u8 {
    (ts.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u8
}

pub fn slot_start(day: i64, hour: u8) -> i64 {
    day * SECONDS_PER_DAY + i64::from(hour) * SECONDS_PER_HOUR
}

pub fn time_slot_label(hour: u8) -> String {
    format!("{:02}:00", hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_timestamp_into_day_and_hour() {
        let ts = slot_start(19_650, 14) + 59 * 60;
        assert_eq!(day_of(ts), 19_650);
        assert_eq!(hour_of(ts), 14);
        assert_eq!(hour_of(slot_start(19_650, 0)), 0);
        assert_eq!(hour_of(slot_start(19_651, 0) - 1), 23);
    }

    #[test]
    fn pre_epoch_timestamps_stay_in_range() {
        assert_eq!(day_of(-1), -1);
        assert_eq!(hour_of(-1), 23);
    }

    #[test]
    fn labels_are_zero_padded() {
        assert_eq!(time_slot_label(9), "09:00");
        assert_eq!(time_slot_label(23), "23:00");
    }
}
