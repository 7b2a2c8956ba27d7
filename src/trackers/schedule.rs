use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Result;

/// Most retry attempts a scheduled check may configure
pub const MAX_RETRY_ATTEMPTS: u32 = 10;

/// Retry attempts used by the default strategy
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

const MINUTE: u64 = 60_000;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Selectable retry interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryInterval {
    /// Human readable label
    pub label: &'static str,
    /// Interval in milliseconds
    pub value_ms: u64,
}

const fn interval(label: &'static str, value_ms: u64) -> RetryInterval {
    RetryInterval { label, value_ms }
}

const HOURLY_INTERVALS: [RetryInterval; 4] = [
    interval("1m", MINUTE),
    interval("3m", 3 * MINUTE),
    interval("5m", 5 * MINUTE),
    interval("10m", 10 * MINUTE),
];

const DAILY_INTERVALS: [RetryInterval; 5] = [
    interval("10m", 10 * MINUTE),
    interval("30m", 30 * MINUTE),
    interval("1h", HOUR),
    interval("2h", 2 * HOUR),
    interval("3h", 3 * HOUR),
];

const WEEKLY_INTERVALS: [RetryInterval; 4] = [
    interval("1h", HOUR),
    interval("3h", 3 * HOUR),
    interval("6h", 6 * HOUR),
    interval("12h", 12 * HOUR),
];

const MONTHLY_INTERVALS: [RetryInterval; 4] = [
    interval("3h", 3 * HOUR),
    interval("12h", 12 * HOUR),
    interval("1d", DAY),
    interval("2d", 2 * DAY),
];

/// How often a tracker is re-checked
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Schedule {
    /// `@`: checked only on demand
    Manual,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    /// Any other cron-like expression understood by the backend
    Custom(String),
}

impl Schedule {
    pub fn as_str(&self) -> &str {
        match self {
            Schedule::Manual => "@",
            Schedule::Hourly => "@hourly",
            Schedule::Daily => "@daily",
            Schedule::Weekly => "@weekly",
            Schedule::Monthly => "@monthly",
            Schedule::Custom(expression) => expression,
        }
    }

    /// Discrete retry intervals offered for this schedule, ascending.
    ///
    /// Manual and custom schedules have no retry table and yield an empty slice.
    pub fn retry_intervals(&self) -> &'static [RetryInterval] {
        match self {
            Schedule::Hourly => &HOURLY_INTERVALS,
            Schedule::Daily => &DAILY_INTERVALS,
            Schedule::Weekly => &WEEKLY_INTERVALS,
            Schedule::Monthly => &MONTHLY_INTERVALS,
            Schedule::Manual | Schedule::Custom(_) => &[],
        }
    }

    /// Interval at index `n / 2` of the retry table.
    ///
    /// For even-length tables this is the upper of the two middle values;
    /// stored configurations depend on that choice.
    pub fn default_retry_interval(&self) -> Option<u64> {
        let intervals = self.retry_intervals();
        intervals.get(intervals.len() / 2).map(|interval| interval.value_ms)
    }

    /// Constant strategy with three attempts at the default interval
    pub fn default_retry_strategy(&self) -> Option<SchedulerJobRetryStrategy> {
        self.default_retry_interval().map(|interval| SchedulerJobRetryStrategy {
            strategy_type: RetryStrategyType::Constant,
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            interval,
        })
    }

    /// Check if an interval is one of this schedule's table entries
    pub fn is_valid_retry_interval(&self, interval_ms: u64) -> bool {
        self.retry_intervals().iter().any(|interval| interval.value_ms == interval_ms)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Schedule {
    type Err = Error;

    /// Custom expressions are kept verbatim, surrounding whitespace included
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::Validation("Schedule cannot be empty".into()));
        }

        Ok(match s {
            "@" => Schedule::Manual,
            "@hourly" => Schedule::Hourly,
            "@daily" => Schedule::Daily,
            "@weekly" => Schedule::Weekly,
            "@monthly" => Schedule::Monthly,
            other => Schedule::Custom(other.to_string()),
        })
    }
}

impl TryFrom<String> for Schedule {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Schedule> for String {
    fn from(schedule: Schedule) -> Self {
        schedule.as_str().to_string()
    }
}

/// Retry intervals for a schedule tag such as `@hourly`
pub fn retry_intervals_for(schedule: &str) -> Result<&'static [RetryInterval]> {
    Ok(schedule.parse::<Schedule>()?.retry_intervals())
}

/// Retry strategy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryStrategyType {
    None,
    Constant,
}

/// How a failed scheduled check is retried by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerJobRetryStrategy {
    #[serde(rename = "type")]
    pub strategy_type: RetryStrategyType,
    /// At least 1
    pub max_attempts: u32,
    /// Milliseconds between attempts
    pub interval: u64,
}

impl SchedulerJobRetryStrategy {
    /// Check the strategy against the table of the schedule it runs under
    pub fn validate(&self, schedule: &Schedule) -> Result<()> {
        if self.strategy_type == RetryStrategyType::None {
            return Ok(());
        }

        if !(1..=MAX_RETRY_ATTEMPTS).contains(&self.max_attempts) {
            return Err(Error::Validation(format!(
                "Retry attempts must be between 1 and {}, got {}",
                MAX_RETRY_ATTEMPTS, self.max_attempts
            )));
        }

        if !schedule.is_valid_retry_interval(self.interval) {
            return Err(Error::Validation(format!(
                "Retry interval {}ms is not available for schedule {}",
                self.interval, schedule
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tables_ascending_and_non_empty() {
        for schedule in [Schedule::Hourly, Schedule::Daily, Schedule::Weekly, Schedule::Monthly] {
            let intervals = schedule.retry_intervals();
            assert!(!intervals.is_empty(), "{} has no intervals", schedule);
            assert!(intervals.windows(2).all(|w| w[0].value_ms < w[1].value_ms));
        }
        assert!(Schedule::Manual.retry_intervals().is_empty());
    }

    #[test]
    fn test_hourly_default_interval_bias() {
        let values: Vec<u64> = Schedule::Hourly.retry_intervals().iter().map(|i| i.value_ms).collect();
        assert_eq!(values, vec![60_000, 180_000, 300_000, 600_000]);
        assert_eq!(Schedule::Hourly.default_retry_interval(), Some(300_000));
    }

    #[test]
    fn test_odd_length_default_is_middle() {
        assert_eq!(Schedule::Daily.default_retry_interval(), Some(HOUR));
    }

    #[test]
    fn test_default_retry_strategy() {
        let strategy = Schedule::Weekly.default_retry_strategy().unwrap();
        assert_eq!(
            strategy,
            SchedulerJobRetryStrategy {
                strategy_type: RetryStrategyType::Constant,
                max_attempts: 3,
                interval: 6 * HOUR,
            }
        );
        assert!(strategy.validate(&Schedule::Weekly).is_ok());
        assert_eq!(Schedule::Manual.default_retry_strategy(), None);
    }

    #[test]
    fn test_schedule_parsing() {
        assert_eq!("@".parse::<Schedule>().unwrap(), Schedule::Manual);
        assert_eq!("@monthly".parse::<Schedule>().unwrap(), Schedule::Monthly);
        assert_eq!(
            "0 0 * * * *".parse::<Schedule>().unwrap(),
            Schedule::Custom("0 0 * * * *".into())
        );
        assert!("".parse::<Schedule>().is_err());
        assert_eq!(retry_intervals_for("@hourly").unwrap().len(), 4);
    }

    #[test]
    fn test_custom_schedule_kept_verbatim() {
        let schedule: Schedule = serde_json::from_value(json!(" 0 0 * * * ")).unwrap();
        assert_eq!(schedule, Schedule::Custom(" 0 0 * * * ".into()));
        assert_eq!(serde_json::to_value(&schedule).unwrap(), json!(" 0 0 * * * "));

        assert_eq!("@daily ".parse::<Schedule>().unwrap(), Schedule::Custom("@daily ".into()));
        assert!("   ".parse::<Schedule>().is_err());
    }

    #[test]
    fn test_schedule_serde() {
        assert_eq!(serde_json::to_value(Schedule::Daily).unwrap(), json!("@daily"));
        let schedule: Schedule = serde_json::from_value(json!("@weekly")).unwrap();
        assert_eq!(schedule, Schedule::Weekly);
    }

    #[test]
    fn test_retry_strategy_wire_shape() {
        let strategy: SchedulerJobRetryStrategy =
            serde_json::from_value(json!({ "type": "constant", "maxAttempts": 5, "interval": 180000 }))
                .unwrap();
        assert_eq!(strategy.strategy_type, RetryStrategyType::Constant);
        assert_eq!(serde_json::to_value(strategy).unwrap()["maxAttempts"], json!(5));
    }

    #[test]
    fn test_retry_strategy_validation() {
        let mut strategy = Schedule::Hourly.default_retry_strategy().unwrap();
        strategy.interval = 42;
        assert!(strategy.validate(&Schedule::Hourly).is_err());

        strategy.interval = 60_000;
        strategy.max_attempts = 0;
        assert!(strategy.validate(&Schedule::Hourly).is_err());

        strategy.max_attempts = 1;
        assert!(strategy.validate(&Schedule::Hourly).is_ok());
        assert!(strategy.validate(&Schedule::Daily).is_err());

        strategy.strategy_type = RetryStrategyType::None;
        assert!(strategy.validate(&Schedule::Manual).is_ok());
    }
}
