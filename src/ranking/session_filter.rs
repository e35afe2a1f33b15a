use crate::model::activity::SessionRecord;
use crate::utils::numeric::to_number;

/// 会话异常值剔除：时长 <= 0 或超过上限的会话不参与任何统计
#[derive(Clone, Copy, Debug)]
pub struct SessionFilter {
    max_duration_seconds: f64,
}

impl SessionFilter {
    pub fn new(max_duration_seconds: i64) -> Self {
        Self {
            max_duration_seconds: max_duration_seconds as f64,
        }
    }

    pub fn accepts(&self, session: &SessionRecord) -> bool {
        let duration = to_number(session.duration_seconds);
        duration > 0.0 && duration <= self.max_duration_seconds
    }

    pub fn filter(&self, sessions: Vec<SessionRecord>) -> Vec<SessionRecord> {
        let before = sessions.len();
        let kept: Vec<SessionRecord> = sessions.into_iter().filter(|s| self.accepts(s)).collect();
        if kept.len() < before {
            tracing::debug!(
                "session_filter - rejected {} of {} sessions",
                before - kept.len(),
                before
            );
        }
        kept
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    pub(crate) fn session(student_id: &str, duration: Option<f64>) -> SessionRecord {
        let started_at = DateTime::parse_from_rfc3339("2026-10-19T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        SessionRecord {
            id: format!("{student_id}-{}", duration.unwrap_or(-1.0)),
            student_id: student_id.to_string(),
            game_type: Some("vocab-blast".to_string()),
            final_score: Some(100.0),
            accuracy_percentage: Some(80.0),
            completion_percentage: Some(100.0),
            duration_seconds: duration,
            started_at,
            ended_at: Some(started_at + Duration::seconds(duration.unwrap_or(0.0) as i64)),
            xp_earned: Some(10.0),
            gems_total: Some(1.0),
        }
    }

    #[test]
    fn rejects_zero_negative_missing_and_overlong_durations() {
        let filter = SessionFilter::new(7200);
        let kept = filter.filter(vec![
            session("s1", Some(0.0)),
            session("s1", Some(-30.0)),
            session("s1", None),
            session("s1", Some(7201.0)),
            session("s1", Some(7200.0)),
            session("s1", Some(1.0)),
        ]);
        let durations: Vec<f64> = kept.iter().map(|s| to_number(s.duration_seconds)).collect();
        assert_eq!(durations, vec![7200.0, 1.0]);
    }
}
