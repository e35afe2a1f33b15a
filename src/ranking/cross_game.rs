use std::collections::{BTreeMap, HashMap};

use crate::dto::leaderboard_dto::{CrossGameLeaderboardEntry, GameScore, StudentLeaderboardEntry};
use crate::model::activity::SessionRecord;
use crate::ranking::metric_aggregator::ActivityIndex;
use crate::ranking::ranker::{assign_ranks, Rankable};
use crate::utils::numeric::to_number;

const UNKNOWN_GAME: &str = "unknown";

/// 班内排名用的临时条目
struct Classmate<'a> {
    student_id: &'a str,
    points: i64,
    rank: u32,
}

impl Rankable for Classmate<'_> {
    fn score(&self) -> i64 {
        self.points
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

/// 跨游戏榜：全局排名之后再截断，截断只影响列表长度
pub fn build(
    students: &[StudentLeaderboardEntry],
    index: &ActivityIndex,
    limit: usize,
) -> Vec<CrossGameLeaderboardEntry> {
    let class_ranks = class_ranks(students);

    let mut entries: Vec<CrossGameLeaderboardEntry> = students
        .iter()
        .map(|student| CrossGameLeaderboardEntry {
            id: student.student_id.clone(),
            student_id: student.student_id.clone(),
            student_name: student.student_name.clone(),
            class_id: student.class_id.clone(),
            class_name: student.class_name.clone(),
            total_points: student.stats.points,
            total_xp: student.stats.xp,
            total_gems: student.stats.gems,
            current_level: student.stats.xp.div_euclid(1000) + 1,
            games_played: student.stats.games_played,
            average_accuracy: student.stats.accuracy,
            average_completion: student.stats.completion,
            total_time_played: student.stats.total_time,
            current_streak: student.stats.streak,
            longest_streak: student.stats.longest_streak,
            last_activity: student.last_activity,
            total_achievements: student.achievements.total,
            rare_achievements: student.achievements.rare,
            epic_achievements: student.achievements.epic,
            legendary_achievements: student.achievements.legendary,
            words_learned: student.stats.mastered_words,
            overall_rank: 0,
            class_rank: class_ranks
                .get(student.student_id.as_str())
                .copied()
                .unwrap_or(1),
            game_scores: game_scores(index.sessions_for(&student.student_id)),
            data_quality_warnings: student.data_quality_warnings.clone(),
        })
        .collect();

    assign_ranks(&mut entries);
    entries.truncate(limit);
    entries
}

fn class_ranks(students: &[StudentLeaderboardEntry]) -> HashMap<&str, u32> {
    let mut by_class: HashMap<&str, Vec<Classmate>> = HashMap::new();
    for student in students {
        by_class
            .entry(student.class_id.as_str())
            .or_default()
            .push(Classmate {
                student_id: &student.student_id,
                points: student.stats.points,
                rank: 0,
            });
    }

    let mut ranks = HashMap::with_capacity(students.len());
    for classmates in by_class.values_mut() {
        assign_ranks(classmates);
        for classmate in classmates.iter() {
            ranks.insert(classmate.student_id, classmate.rank);
        }
    }
    ranks
}

/// 按游戏类型分组：最高分、最高正确率、局数、最后一次结束时间
pub fn game_scores(sessions: &[SessionRecord]) -> BTreeMap<String, GameScore> {
    let mut scores: BTreeMap<String, GameScore> = BTreeMap::new();
    for session in sessions {
        let key = session
            .game_type
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(UNKNOWN_GAME);
        let score = to_number(session.final_score);
        let accuracy = to_number(session.accuracy_percentage);

        match scores.get_mut(key) {
            Some(game) => {
                game.best_score = game.best_score.max(score);
                game.best_accuracy = game.best_accuracy.max(accuracy);
                game.games_played += 1;
                game.last_played = game.last_played.max(session.ended_at);
            }
            None => {
                scores.insert(
                    key.to_string(),
                    GameScore {
                        best_score: score,
                        best_accuracy: accuracy,
                        games_played: 1,
                        last_played: session.ended_at,
                    },
                );
            }
        }
    }
    scores
}
