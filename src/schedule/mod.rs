pub mod plan;
pub mod runner;

use thiserror::Error;

/// A schedule value containing this literal bypasses planning entirely: one
/// collection cycle runs immediately and the process exits.
pub const NOW_LITERAL: &str = "now";

/// A daily wall-clock firing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMark {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// Run one collection cycle immediately, register no timers.
    Now,
    /// Fire at each mark, each day, for `days` days starting today.
    Daily { days: u32, marks: Vec<TimeMark> },
}

#[derive(Debug, Error)]
pub enum ScheduleParseError {
    #[error("malformed schedule entry '{0}', expected H:MM")]
    Malformed(String),

    #[error("hour {0} out of range 0-23 in schedule entry")]
    HourOutOfRange(u32),

    #[error("minute {0} out of range 0-59 in schedule entry")]
    MinuteOutOfRange(u32),

    #[error("schedule contains no entries")]
    Empty,
}

impl Schedule {
    /// Parses the raw schedule configuration. Malformed entries are a
    /// configuration error and fail fast; nothing here is retried.
    pub fn parse(days: u32, raw: &str) -> Result<Self, ScheduleParseError> {
        if raw.contains(NOW_LITERAL) {
            return Ok(Schedule::Now);
        }
        let marks = parse_marks(raw)?;
        Ok(Schedule::Daily { days, marks })
    }
}

/// Parses a comma-separated "H:MM" list in input order.
pub fn parse_marks(raw: &str) -> Result<Vec<TimeMark>, ScheduleParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScheduleParseError::Empty);
    }

    trimmed.split(',').map(parse_mark).collect()
}

fn parse_mark(entry: &str) -> Result<TimeMark, ScheduleParseError> {
    let entry = entry.trim();
    let (hour_str, minute_str) = entry
        .split_once(':')
        .ok_or_else(|| ScheduleParseError::Malformed(entry.to_string()))?;

    let hour: u32 = hour_str
        .trim()
        .parse()
        .map_err(|_| ScheduleParseError::Malformed(entry.to_string()))?;
    let minute: u32 = minute_str
        .trim()
        .parse()
        .map_err(|_| ScheduleParseError::Malformed(entry.to_string()))?;

    if hour > 23 {
        return Err(ScheduleParseError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ScheduleParseError::MinuteOutOfRange(minute));
    }

    Ok(TimeMark { hour, minute })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mark_list_in_input_order() {
        let marks = parse_marks("9:00,12:30, 15:05 ,18:00").unwrap();
        assert_eq!(
            marks,
            vec![
                TimeMark { hour: 9, minute: 0 },
                TimeMark { hour: 12, minute: 30 },
                TimeMark { hour: 15, minute: 5 },
                TimeMark { hour: 18, minute: 0 },
            ]
        );
    }

    #[test]
    fn test_malformed_entries_fail_fast() {
        assert!(matches!(
            parse_marks("9:00,noon"),
            Err(ScheduleParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_marks("24:00"),
            Err(ScheduleParseError::HourOutOfRange(24))
        ));
        assert!(matches!(
            parse_marks("9:60"),
            Err(ScheduleParseError::MinuteOutOfRange(60))
        ));
        assert!(matches!(parse_marks("  "), Err(ScheduleParseError::Empty)));
    }

    #[test]
    fn test_now_literal_bypasses_planning() {
        assert_eq!(Schedule::parse(5, "now").unwrap(), Schedule::Now);
    }

    #[test]
    fn test_daily_schedule_keeps_days_and_marks() {
        let schedule = Schedule::parse(3, "9:00,17:30").unwrap();
        assert_eq!(
            schedule,
            Schedule::Daily {
                days: 3,
                marks: vec![
                    TimeMark { hour: 9, minute: 0 },
                    TimeMark { hour: 17, minute: 30 },
                ],
            }
        );
    }
}
