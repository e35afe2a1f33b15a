use std::collections::HashMap;

use crate::dto::leaderboard_dto::{ClassLeaderboardEntry, StudentLeaderboardEntry, TopStudent};
use crate::model::activity::ClassInfo;
use crate::ranking::ranker::assign_ranks;
use crate::utils::numeric::{average, round1, saturating_total};

/// 按班级汇总学生数据并排名。没有学生的班级也会保留，各项为 0。
pub fn build(
    classes: &[ClassInfo],
    students: &[StudentLeaderboardEntry],
) -> Vec<ClassLeaderboardEntry> {
    let mut members: HashMap<&str, Vec<&StudentLeaderboardEntry>> = HashMap::new();
    for student in students {
        members
            .entry(student.class_id.as_str())
            .or_default()
            .push(student);
    }

    let mut entries: Vec<ClassLeaderboardEntry> = classes
        .iter()
        .map(|class| {
            let roster = members
                .get(class.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            rollup(class, roster)
        })
        .collect();

    assign_ranks(&mut entries);
    entries
}

fn rollup(class: &ClassInfo, roster: &[&StudentLeaderboardEntry]) -> ClassLeaderboardEntry {
    let mean = |value: fn(&StudentLeaderboardEntry) -> f64| {
        let values: Vec<f64> = roster.iter().map(|s| value(s)).collect();
        round1(average(&values))
    };

    // 同分时取名单中靠前的学生
    let top_student = roster.iter().fold(None::<&&StudentLeaderboardEntry>, |best, s| {
        match best {
            Some(b) if b.stats.points >= s.stats.points => Some(b),
            _ => Some(s),
        }
    });

    ClassLeaderboardEntry {
        class_id: class.id.clone(),
        class_name: class.name.clone(),
        total_points: saturating_total(roster.iter().map(|s| s.stats.points)),
        total_gems: saturating_total(roster.iter().map(|s| s.stats.gems)),
        student_count: roster.len(),
        average_accuracy: mean(|s| s.stats.accuracy),
        average_completion: mean(|s| s.stats.completion),
        average_streak: mean(|s| s.stats.streak as f64),
        top_student: top_student.map(|s| TopStudent {
            student_id: s.student_id.clone(),
            student_name: s.student_name.clone(),
            points: s.stats.points,
        }),
        rank: 0,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dto::leaderboard_dto::{AchievementSummary, StudentStats};

    pub(crate) fn student(id: &str, class_id: &str, points: i64, accuracy: f64) -> StudentLeaderboardEntry {
        StudentLeaderboardEntry {
            student_id: id.to_string(),
            student_name: id.to_uppercase(),
            email: String::new(),
            avatar_initials: String::new(),
            class_id: class_id.to_string(),
            class_name: class_id.to_string(),
            stats: StudentStats {
                points,
                xp: points,
                accuracy,
                completion: 100.0,
                streak: 2,
                ..Default::default()
            },
            achievements: AchievementSummary::default(),
            last_activity: None,
            rank: 0,
            data_quality_warnings: None,
        }
    }

    fn class(id: &str) -> ClassInfo {
        ClassInfo {
            id: id.to_string(),
            name: format!("Class {id}"),
        }
    }

    #[test]
    fn rolls_up_members_and_ranks_classes() {
        let students = vec![
            student("b", "c1", 250, 90.0),
            student("a", "c1", 150, 80.0),
            student("x", "c2", 500, 70.0),
        ];
        let entries = build(&[class("c1"), class("c2")], &students);

        assert_eq!(entries[0].class_id, "c2");
        assert_eq!(entries[0].rank, 1);
        let c1 = &entries[1];
        assert_eq!(c1.rank, 2);
        assert_eq!(c1.total_points, 400);
        assert_eq!(c1.student_count, 2);
        assert_eq!(c1.average_accuracy, 85.0);
        assert_eq!(c1.average_streak, 2.0);
        assert_eq!(c1.top_student.as_ref().map(|t| t.student_id.as_str()), Some("b"));
    }

    #[test]
    fn empty_class_is_kept_with_zeroes() {
        let entries = build(&[class("empty")], &[]);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.total_points, 0);
        assert_eq!(entry.student_count, 0);
        assert_eq!(entry.average_accuracy, 0.0);
        assert!(entry.top_student.is_none());
        assert_eq!(entry.rank, 1);
    }

    #[test]
    fn top_student_tie_goes_to_first_listed() {
        let students = vec![student("first", "c1", 100, 50.0), student("second", "c1", 100, 50.0)];
        let entries = build(&[class("c1")], &students);
        assert_eq!(
            entries[0].top_student.as_ref().map(|t| t.student_id.as_str()),
            Some("first")
        );
    }
    #[test]
    fn class_totals_saturate() {
        let mut rich = student("r", "c1", i64::MAX, 90.0);
        rich.stats.gems = i64::MAX;
        let mut also_rich = student("q", "c1", i64::MAX, 90.0);
        also_rich.stats.gems = 7;
        let entries = build(&[class("c1")], &[rich, also_rich]);

        assert_eq!(entries[0].total_points, i64::MAX);
        assert_eq!(entries[0].total_gems, i64::MAX);
        assert_eq!(entries[0].rank, 1);
    }
}
