//! 按学生把会话、成就、连胜、掌握词数合并成一条汇总
//!
//! 每个数据源先建一张以学生 id 为键的索引，再按学生 id 列表单次遍历组装，
//! 没有任何会话的学生也会出现在结果里（各项为 0）。

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::config::leaderboard_config::LeaderboardConfig;
use crate::dto::leaderboard_dto::{
    AchievementSummary, RecentAchievement, StudentLeaderboardEntry, StudentStats,
};
use crate::model::activity::{
    AchievementRecord, ClassInfo, Rarity, SessionRecord, StreakAggregate, StudentProfile,
    VocabularyItemRow,
};
use crate::ranking::quality_validator::QualityValidator;
use crate::ranking::session_filter::SessionFilter;
use crate::utils::numeric::{average, round1, sum_to_integer, to_integer, to_number};
use crate::utils::text::initials;

pub const UNKNOWN_STUDENT: &str = "Unknown Student";
pub const UNASSIGNED_CLASS: &str = "Unassigned";

/// 并发取回的原始数据
#[derive(Clone, Debug, Default)]
pub struct FetchedActivity {
    pub profiles: Vec<StudentProfile>,
    pub sessions: Vec<SessionRecord>,
    pub achievements: Vec<AchievementRecord>,
    pub vocabulary_items: Vec<VocabularyItemRow>,
}

/// 按学生 id 建好的索引，会话已经过滤
#[derive(Debug, Default)]
pub struct ActivityIndex {
    profiles: HashMap<String, StudentProfile>,
    sessions: HashMap<String, Vec<SessionRecord>>,
    achievements: HashMap<String, AchievementSummary>,
    streaks: HashMap<String, StreakAggregate>,
    mastered: HashMap<String, i64>,
}

impl ActivityIndex {
    pub fn sessions_for(&self, student_id: &str) -> &[SessionRecord] {
        self.sessions
            .get(student_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MetricAggregator {
    filter: SessionFilter,
    validator: QualityValidator,
    mastery_threshold: f64,
    recent_achievements: usize,
}

impl MetricAggregator {
    pub fn new(config: &LeaderboardConfig) -> Self {
        Self {
            filter: SessionFilter::new(config.max_session_seconds),
            validator: QualityValidator::new(config.daily_hours_limit, config.daily_session_limit),
            mastery_threshold: config.mastery_threshold,
            recent_achievements: config.recent_achievements,
        }
    }

    pub fn index(&self, fetched: FetchedActivity) -> ActivityIndex {
        let profiles = fetched
            .profiles
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect();

        let mut sessions: HashMap<String, Vec<SessionRecord>> = HashMap::new();
        for session in self.filter.filter(fetched.sessions) {
            sessions
                .entry(session.student_id.clone())
                .or_default()
                .push(session);
        }

        ActivityIndex {
            profiles,
            sessions,
            achievements: summarize_achievements(fetched.achievements, self.recent_achievements),
            streaks: fold_streaks(&fetched.vocabulary_items),
            mastered: count_mastered(&fetched.vocabulary_items, self.mastery_threshold),
        }
    }

    pub fn build_entry(
        &self,
        student_id: &str,
        class: Option<&ClassInfo>,
        index: &ActivityIndex,
    ) -> StudentLeaderboardEntry {
        let profile = index.profiles.get(student_id);
        let sessions = index.sessions_for(student_id);
        let streak = index.streaks.get(student_id).copied().unwrap_or_default();

        let display_name = profile
            .and_then(|p| p.display_name.as_deref())
            .filter(|name| !name.trim().is_empty());
        let email = profile
            .and_then(|p| p.email.as_deref())
            .unwrap_or_default();
        let initials_source = display_name
            .or(Some(email).filter(|e| !e.is_empty()))
            .unwrap_or("Student");

        let warnings = self.validator.validate(sessions);

        StudentLeaderboardEntry {
            student_id: student_id.to_string(),
            student_name: display_name.unwrap_or(UNKNOWN_STUDENT).to_string(),
            email: email.to_string(),
            avatar_initials: initials(initials_source),
            class_id: class.map(|c| c.id.clone()).unwrap_or_default(),
            class_name: class
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNASSIGNED_CLASS.to_string()),
            stats: session_stats(sessions, streak, index.mastered.get(student_id).copied()),
            achievements: index
                .achievements
                .get(student_id)
                .cloned()
                .unwrap_or_default(),
            last_activity: sessions.iter().filter_map(|s| s.ended_at).max(),
            rank: 0,
            data_quality_warnings: (!warnings.is_empty()).then_some(warnings),
        }
    }
}

fn session_stats(
    sessions: &[SessionRecord],
    streak: StreakAggregate,
    mastered_words: Option<i64>,
) -> StudentStats {
    let xp = sum_to_integer(sessions.iter().map(|s| s.xp_earned));
    let gems = sum_to_integer(sessions.iter().map(|s| s.gems_total));
    let accuracy: Vec<f64> = sessions
        .iter()
        .map(|s| to_number(s.accuracy_percentage))
        .collect();
    let completion: Vec<f64> = sessions
        .iter()
        .map(|s| to_number(s.completion_percentage))
        .collect();

    StudentStats {
        points: xp.saturating_add(gems.saturating_mul(5)),
        xp,
        gems,
        accuracy: round1(average(&accuracy)),
        completion: round1(average(&completion)),
        streak: streak.max_current_streak,
        longest_streak: streak.max_best_streak,
        games_played: sessions.len(),
        total_time: sum_to_integer(sessions.iter().map(|s| s.duration_seconds)),
        mastered_words: mastered_words.unwrap_or(0),
    }
}

/// 多行词汇记录折叠成每个学生一行：当前/最佳连胜取最大值，并计数
pub fn fold_streaks(rows: &[VocabularyItemRow]) -> HashMap<String, StreakAggregate> {
    rows.iter().fold(HashMap::new(), |mut acc, row| {
        let aggregate: &mut StreakAggregate = acc.entry(row.student_id.clone()).or_default();
        aggregate.max_current_streak = aggregate
            .max_current_streak
            .max(to_integer(row.current_streak));
        aggregate.max_best_streak = aggregate.max_best_streak.max(to_integer(row.best_streak));
        aggregate.total_words += 1;
        acc
    })
}

pub fn count_mastered(rows: &[VocabularyItemRow], threshold: f64) -> HashMap<String, i64> {
    rows.iter()
        .filter(|row| to_number(row.mastery_level) >= threshold)
        .fold(HashMap::new(), |mut acc, row| {
            *acc.entry(row.student_id.clone()).or_insert(0) += 1;
            acc
        })
}

/// 成就按获得时间倒序（同一时间保持取回顺序），每个学生最多保留 `recent` 条最近记录
pub fn summarize_achievements(
    mut records: Vec<AchievementRecord>,
    recent: usize,
) -> HashMap<String, AchievementSummary> {
    records.sort_by_key(|record| Reverse(record.earned_at));

    let mut summaries: HashMap<String, AchievementSummary> = HashMap::new();
    for record in records {
        let summary = summaries.entry(record.student_id.clone()).or_default();
        summary.total += 1;
        match Rarity::from(record.rarity.as_str()) {
            Rarity::Rare => summary.rare += 1,
            Rarity::Epic => summary.epic += 1,
            Rarity::Legendary => summary.legendary += 1,
            Rarity::Common => {}
        }
        if summary.recent.len() < recent {
            summary.recent.push(RecentAchievement {
                points: to_number(record.points_awarded),
                title: record.title,
                earned_at: record.earned_at,
                rarity: record.rarity,
            });
        }
    }
    summaries
}
