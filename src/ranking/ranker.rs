use std::cmp::Reverse;

use crate::dto::leaderboard_dto::{
    ClassLeaderboardEntry, CrossGameLeaderboardEntry, StudentLeaderboardEntry,
};

/// 能参与排名的条目
pub trait Rankable {
    fn score(&self) -> i64;
    fn set_rank(&mut self, rank: u32);
}

/// 按分数降序稳定排序后依次赋名次（从 1 开始，连续不跳号）。
/// 同分按排序前的相对顺序先后排列。
pub fn assign_ranks<T: Rankable>(entries: &mut [T]) {
    entries.sort_by_key(|entry| Reverse(entry.score()));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.set_rank(index as u32 + 1);
    }
}

impl Rankable for StudentLeaderboardEntry {
    fn score(&self) -> i64 {
        self.stats.points
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

impl Rankable for ClassLeaderboardEntry {
    fn score(&self) -> i64 {
        self.total_points
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

impl Rankable for CrossGameLeaderboardEntry {
    fn score(&self) -> i64 {
        self.total_points
    }

    fn set_rank(&mut self, rank: u32) {
        self.overall_rank = rank;
    }
}
