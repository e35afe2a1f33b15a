//! 请求级别的枚举：时间段、范围

use serde::{Deserialize, Serialize};

/// 无法识别的取值按 `all_time` 处理，缺省值是 `weekly`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TimePeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
    AllTime,
}

impl From<&str> for TimePeriod {
    fn from(value: &str) -> Self {
        match value.trim() {
            "daily" => TimePeriod::Daily,
            "weekly" => TimePeriod::Weekly,
            "monthly" => TimePeriod::Monthly,
            _ => TimePeriod::AllTime,
        }
    }
}

impl From<String> for TimePeriod {
    fn from(value: String) -> Self {
        TimePeriod::from(value.as_str())
    }
}

/// 排行榜覆盖的学生范围，无法识别时按 `my-classes` 处理
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum LeaderboardScope {
    #[default]
    MyClasses,
    School,
}

impl From<String> for LeaderboardScope {
    fn from(value: String) -> Self {
        match value.trim() {
            "school" => LeaderboardScope::School,
            _ => LeaderboardScope::MyClasses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_fall_back_to_documented_defaults() {
        let period: TimePeriod = serde_json::from_str(r#""fortnightly""#).unwrap();
        assert_eq!(period, TimePeriod::AllTime);
        let period: TimePeriod = serde_json::from_str(r#""monthly""#).unwrap();
        assert_eq!(period, TimePeriod::Monthly);

        let scope: LeaderboardScope = serde_json::from_str(r#""district""#).unwrap();
        assert_eq!(scope, LeaderboardScope::MyClasses);
        let scope: LeaderboardScope = serde_json::from_str(r#""school""#).unwrap();
        assert_eq!(scope, LeaderboardScope::School);
    }

    #[test]
    fn serializes_wire_names() {
        assert_eq!(
            serde_json::to_string(&TimePeriod::AllTime).unwrap(),
            r#""all_time""#
        );
        assert_eq!(
            serde_json::to_string(&LeaderboardScope::MyClasses).unwrap(),
            r#""my-classes""#
        );
    }
}
