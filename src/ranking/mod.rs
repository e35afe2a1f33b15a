//! 排行榜计算：时间窗口、会话过滤、指标聚合、质量校验、排名、班级汇总、跨游戏榜
//!
//! 这里的代码不做任何 IO，输入都是已经取回来的记录。

pub mod class_rollup;
pub mod cross_game;
pub mod metric_aggregator;
pub mod quality_validator;
pub mod ranker;
pub mod session_filter;
pub mod time_window;
