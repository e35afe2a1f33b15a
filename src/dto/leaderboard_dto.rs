//! 排行榜传输用到的数据结构
//!
//! 学生榜、班级榜沿用 camelCase，跨游戏榜沿用 snake_case。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::leaderboard::{LeaderboardScope, TimePeriod};

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardReq {
    #[validate(length(
        min = 1,
        max = 64,
        message = "requesterId must be between 1 and 64 characters"
    ))]
    pub requester_id: String,
    #[serde(default)]
    pub scope: LeaderboardScope,
    #[validate(length(
        min = 1,
        max = 64,
        message = "classId must be between 1 and 64 characters"
    ))]
    pub class_id: Option<String>,
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: Option<usize>,
    #[serde(default)]
    pub time_period: TimePeriod,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub points: i64,
    pub xp: i64,
    pub gems: i64,
    pub accuracy: f64,
    pub completion: f64,
    pub streak: i64,
    pub longest_streak: i64,
    pub games_played: usize,
    pub total_time: i64,
    pub mastered_words: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAchievement {
    pub title: String,
    pub earned_at: DateTime<Utc>,
    pub rarity: String,
    pub points: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AchievementSummary {
    pub total: usize,
    pub rare: usize,
    pub epic: usize,
    pub legendary: usize,
    pub recent: Vec<RecentAchievement>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLeaderboardEntry {
    pub student_id: String,
    pub student_name: String,
    pub email: String,
    pub avatar_initials: String,
    pub class_id: String,
    pub class_name: String,
    pub stats: StudentStats,
    pub achievements: AchievementSummary,
    pub last_activity: Option<DateTime<Utc>>,
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_quality_warnings: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStudent {
    pub student_id: String,
    pub student_name: String,
    pub points: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLeaderboardEntry {
    pub class_id: String,
    pub class_name: String,
    pub total_points: i64,
    pub total_gems: i64,
    pub student_count: usize,
    pub average_accuracy: f64,
    pub average_completion: f64,
    pub average_streak: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_student: Option<TopStudent>,
    pub rank: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameScore {
    pub best_score: f64,
    pub best_accuracy: f64,
    pub games_played: usize,
    pub last_played: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CrossGameLeaderboardEntry {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub class_id: String,
    pub class_name: String,
    pub total_points: i64,
    pub total_xp: i64,
    pub total_gems: i64,
    pub current_level: i64,
    pub games_played: usize,
    pub average_accuracy: f64,
    pub average_completion: f64,
    pub total_time_played: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_activity: Option<DateTime<Utc>>,
    pub total_achievements: usize,
    pub rare_achievements: usize,
    pub epic_achievements: usize,
    pub legendary_achievements: usize,
    pub words_learned: i64,
    pub overall_rank: u32,
    pub class_rank: u32,
    pub game_scores: BTreeMap<String, GameScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_quality_warnings: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSummary {
    pub total_students: usize,
    pub total_classes: usize,
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub total_gems: i64,
    pub time_period: TimePeriod,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub students: Vec<StudentLeaderboardEntry>,
    pub classes: Vec<ClassLeaderboardEntry>,
    pub cross_leaderboard: Vec<CrossGameLeaderboardEntry>,
    pub summary: LeaderboardSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_and_validation() {
        let req: LeaderboardReq =
            serde_json::from_str(r#"{"requesterId": "teacher-1"}"#).unwrap();
        assert_eq!(req.scope, LeaderboardScope::MyClasses);
        assert_eq!(req.time_period, TimePeriod::Weekly);
        assert!(req.validate().is_ok());

        let req = LeaderboardReq {
            requester_id: "teacher-1".to_string(),
            limit: Some(0),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn missing_top_student_is_omitted() {
        let entry = ClassLeaderboardEntry {
            class_id: "c1".to_string(),
            class_name: "7B".to_string(),
            total_points: 0,
            total_gems: 0,
            student_count: 0,
            average_accuracy: 0.0,
            average_completion: 0.0,
            average_streak: 0.0,
            top_student: None,
            rank: 1,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("topStudent").is_none());
        assert_eq!(json["totalPoints"], 0);
    }
}
