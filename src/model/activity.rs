//! 从活动库读出来的原始记录
//!
//! 数值字段统一用 `Option<f64>`，上游可能是 NULL 或非法值，聚合时再做容错转换。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Enrollment {
    pub student_id: String,
    pub class_id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct StudentProfile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// 一局已结束的游戏
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: String,
    pub student_id: String,
    pub game_type: Option<String>,
    pub final_score: Option<f64>,
    pub accuracy_percentage: Option<f64>,
    pub completion_percentage: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub xp_earned: Option<f64>,
    pub gems_total: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct AchievementRecord {
    pub student_id: String,
    pub title: String,
    pub rarity: String,
    pub points_awarded: Option<f64>,
    pub earned_at: DateTime<Utc>,
}

/// 词汇收集表的一行（每个学生每个词一行）
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct VocabularyItemRow {
    pub student_id: String,
    pub current_streak: Option<f64>,
    pub best_streak: Option<f64>,
    pub mastery_level: Option<f64>,
}

/// 按学生折叠后的连胜数据
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakAggregate {
    pub max_current_streak: i64,
    pub max_best_streak: i64,
    pub total_words: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl From<&str> for Rarity {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            _ => Rarity::Common,
        }
    }
}
