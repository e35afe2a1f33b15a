use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::activity::SessionRecord;
use crate::utils::numeric::to_number;

/// 按会话开始日期（UTC）检查单日活动是否异常，只产生提示，不剔除数据
#[derive(Clone, Copy, Debug)]
pub struct QualityValidator {
    daily_hours_limit: f64,
    daily_session_limit: usize,
}

#[derive(Default)]
struct DayBucket {
    seconds: f64,
    sessions: usize,
}

impl QualityValidator {
    pub fn new(daily_hours_limit: f64, daily_session_limit: usize) -> Self {
        Self {
            daily_hours_limit,
            daily_session_limit,
        }
    }

    pub fn validate(&self, sessions: &[SessionRecord]) -> Vec<String> {
        let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
        for session in sessions {
            let bucket = days.entry(session.started_at.date_naive()).or_default();
            bucket.seconds += to_number(session.duration_seconds);
            bucket.sessions += 1;
        }

        let mut warnings = Vec::new();
        for (date, bucket) in &days {
            let hours = bucket.seconds / 3600.0;
            if hours > self.daily_hours_limit {
                warnings.push(format!(
                    "{:.1}h on {} (>{}h/day)",
                    hours,
                    date.format("%Y-%m-%d"),
                    self.daily_hours_limit
                ));
            }
            if bucket.sessions > self.daily_session_limit {
                warnings.push(format!(
                    "{} sessions on {} (bulk import?)",
                    bucket.sessions,
                    date.format("%Y-%m-%d")
                ));
            }
        }
        warnings
    }
}
