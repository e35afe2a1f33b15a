//! 排行榜引擎的可调参数
//!
//! 这些阈值都是经验值，统一放在这里方便通过环境变量覆盖。

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use super::parameter;

#[derive(Clone, Debug)]
pub struct LeaderboardConfig {
    /// 单局时长上限（秒），超过或 <= 0 的会话直接剔除
    pub max_session_seconds: i64,
    /// 单日累计时长告警阈值（小时）
    pub daily_hours_limit: f64,
    /// 单日会话数告警阈值
    pub daily_session_limit: usize,
    pub achievement_fetch_limit: i64,
    pub mastery_threshold: f64,
    pub recent_achievements: usize,
    pub default_limit: usize,
    pub platform_epoch: DateTime<Utc>,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            max_session_seconds: 7200,
            daily_hours_limit: 8.0,
            daily_session_limit: 100,
            achievement_fetch_limit: 500,
            mastery_threshold: 3.0,
            recent_achievements: 5,
            default_limit: 100,
            platform_epoch: *DEFAULT_EPOCH,
        }
    }
}

impl LeaderboardConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let platform_epoch = match std::env::var("PLATFORM_EPOCH") {
            Ok(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|epoch| epoch.with_timezone(&Utc))
                .unwrap_or_else(|err| {
                    tracing::warn!(
                        "config -- env var `PLATFORM_EPOCH` is invalid: {}, using default",
                        err
                    );
                    defaults.platform_epoch
                }),
            Err(_) => defaults.platform_epoch,
        };

        Self {
            max_session_seconds: parameter::get_or(
                "MAX_SESSION_SECONDS",
                defaults.max_session_seconds,
            ),
            daily_hours_limit: parameter::get_or("DAILY_HOURS_LIMIT", defaults.daily_hours_limit),
            daily_session_limit: parameter::get_or(
                "DAILY_SESSION_LIMIT",
                defaults.daily_session_limit,
            ),
            achievement_fetch_limit: parameter::get_or(
                "ACHIEVEMENT_FETCH_LIMIT",
                defaults.achievement_fetch_limit,
            ),
            mastery_threshold: parameter::get_or("MASTERY_THRESHOLD", defaults.mastery_threshold),
            recent_achievements: parameter::get_or(
                "RECENT_ACHIEVEMENTS",
                defaults.recent_achievements,
            ),
            default_limit: parameter::get_or("DEFAULT_LIMIT", defaults.default_limit),
            platform_epoch,
        }
    }
}

static DEFAULT_EPOCH: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339(parameter::PLATFORM_EPOCH)
        .map(|epoch| epoch.with_timezone(&Utc))
        .unwrap_or_default()
});
