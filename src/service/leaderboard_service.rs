use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::config::leaderboard_config::LeaderboardConfig;
use crate::dto::leaderboard_dto::{
    LeaderboardReq, LeaderboardResponse, LeaderboardSummary, StudentLeaderboardEntry,
};
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::model::activity::{ClassInfo, Enrollment};
use crate::model::leaderboard::{LeaderboardScope, TimePeriod};
use crate::ranking::metric_aggregator::{FetchedActivity, MetricAggregator};
use crate::ranking::ranker::assign_ranks;
use crate::ranking::{class_rollup, cross_game, time_window};
use crate::repository::activity_repository::ActivityStore;
use crate::service::scope_resolver::{resolve_organization_scope, ResolvedScope};
use crate::utils::numeric::saturating_total;

/// 排行榜组装入口：每次请求现查现算，不缓存
pub struct LeaderboardService<S: ActivityStore> {
    store: Arc<S>,
    config: LeaderboardConfig,
    aggregator: MetricAggregator,
}

impl<S: ActivityStore> LeaderboardService<S> {
    pub fn new(store: Arc<S>, config: LeaderboardConfig) -> Self {
        let aggregator = MetricAggregator::new(&config);
        Self {
            store,
            config,
            aggregator,
        }
    }

    pub async fn get_leaderboards(
        &self,
        payload: &LeaderboardReq,
    ) -> Result<LeaderboardResponse, ApiError> {
        self.get_leaderboards_at(payload, Local::now()).await
    }

    /// `now` 决定时间窗口，按其所在时区计算零点
    pub async fn get_leaderboards_at<Tz>(
        &self,
        payload: &LeaderboardReq,
        now: DateTime<Tz>,
    ) -> Result<LeaderboardResponse, ApiError>
    where
        Tz: TimeZone + Send + Sync,
        Tz::Offset: Send + Sync,
    {
        let classes = self.resolve_classes(payload).await?;
        if classes.is_empty() {
            return Ok(self.empty_response(payload.time_period, &[]));
        }

        let class_ids: Vec<String> = classes.iter().map(|c| c.id.clone()).collect();
        let enrollments = self
            .store
            .fetch_enrollments(&class_ids)
            .await
            .map_err(|err| DbError::fetch_failed("enrollments", err))?;
        let (student_ids, student_class) = roster(&enrollments);
        if student_ids.is_empty() {
            return Ok(self.empty_response(payload.time_period, &classes));
        }

        let window = time_window::resolve(payload.time_period, now, self.config.platform_epoch);
        let fetched = self.fetch_activity(&student_ids, window.start).await?;
        let index = self.aggregator.index(fetched);

        let class_map: HashMap<&str, &ClassInfo> =
            classes.iter().map(|c| (c.id.as_str(), c)).collect();
        let mut students: Vec<StudentLeaderboardEntry> = student_ids
            .iter()
            .map(|student_id| {
                let class = student_class
                    .get(student_id.as_str())
                    .and_then(|class_id| class_map.get(class_id).copied());
                self.aggregator.build_entry(student_id, class, &index)
            })
            .collect();
        assign_ranks(&mut students);

        let class_entries = class_rollup::build(&classes, &students);
        let limit = payload.limit.unwrap_or(self.config.default_limit);
        let cross_leaderboard = cross_game::build(&students, &index, limit);

        let summary = LeaderboardSummary {
            total_students: students.len(),
            total_classes: class_entries.len(),
            total_xp: saturating_total(students.iter().map(|s| s.stats.xp)),
            total_gems: saturating_total(students.iter().map(|s| s.stats.gems)),
            time_period: payload.time_period,
            generated_at: Utc::now(),
        };
        tracing::info!(
            "get_leaderboards - requester:{} | scope:{:?} | period:{:?} | students:{} | classes:{}",
            payload.requester_id,
            payload.scope,
            payload.time_period,
            summary.total_students,
            summary.total_classes
        );

        Ok(LeaderboardResponse {
            students,
            classes: class_entries,
            cross_leaderboard,
            summary,
        })
    }

    /// 确定参与排名的班级
    async fn resolve_classes(&self, payload: &LeaderboardReq) -> Result<Vec<ClassInfo>, ApiError> {
        let owned = self
            .store
            .fetch_owned_classes(&payload.requester_id)
            .await
            .map_err(|err| DbError::fetch_failed("classes", err))?;

        match payload.scope {
            LeaderboardScope::School => {
                let scope = resolve_organization_scope(
                    self.store.as_ref(),
                    &payload.requester_id,
                    &owned,
                )
                .await
                .map_err(|err| DbError::fetch_failed("organization", err))?;
                match scope {
                    ResolvedScope::Organization(organization_id) => Ok(self
                        .store
                        .fetch_organization_classes(&organization_id)
                        .await
                        .map_err(|err| DbError::fetch_failed("organization classes", err))?),
                    // 全校范围不按单个班级收窄
                    ResolvedScope::MyClasses => Ok(owned),
                }
            }
            LeaderboardScope::MyClasses => Ok(match &payload.class_id {
                Some(class_id) => owned.into_iter().filter(|c| &c.id == class_id).collect(),
                None => owned,
            }),
        }
    }

    /// 各数据源互不依赖，并发读取；任意一个失败整个请求失败
    async fn fetch_activity(
        &self,
        student_ids: &[String],
        since: DateTime<Utc>,
    ) -> Result<FetchedActivity, ApiError> {
        let store = self.store.as_ref();
        let (profiles, sessions, achievements, vocabulary_items) = tokio::try_join!(
            async {
                store
                    .fetch_profiles(student_ids)
                    .await
                    .map_err(|err| DbError::fetch_failed("profiles", err))
            },
            async {
                store
                    .fetch_sessions(student_ids, since)
                    .await
                    .map_err(|err| DbError::fetch_failed("sessions", err))
            },
            async {
                store
                    .fetch_achievements(student_ids, since, self.config.achievement_fetch_limit)
                    .await
                    .map_err(|err| DbError::fetch_failed("achievements", err))
            },
            async {
                store
                    .fetch_vocabulary_items(student_ids)
                    .await
                    .map_err(|err| DbError::fetch_failed("vocabulary items", err))
            },
        )?;

        Ok(FetchedActivity {
            profiles,
            sessions,
            achievements,
            vocabulary_items,
        })
    }

    /// 没有学生时返回结构完整的空结果；有班级则保留班级，各项为 0
    fn empty_response(&self, time_period: TimePeriod, classes: &[ClassInfo]) -> LeaderboardResponse {
        let class_entries = class_rollup::build(classes, &[]);
        LeaderboardResponse {
            students: vec![],
            cross_leaderboard: vec![],
            summary: LeaderboardSummary {
                total_students: 0,
                total_classes: class_entries.len(),
                total_xp: 0,
                total_gems: 0,
                time_period,
                generated_at: Utc::now(),
            },
            classes: class_entries,
        }
    }
}

/// 去重后的学生列表（保持首次出现顺序），以及学生所在的第一个班级
fn roster(enrollments: &[Enrollment]) -> (Vec<String>, HashMap<&str, &str>) {
    let mut seen = HashSet::new();
    let mut student_ids = Vec::new();
    let mut student_class = HashMap::new();
    for enrollment in enrollments {
        if seen.insert(enrollment.student_id.as_str()) {
            student_ids.push(enrollment.student_id.clone());
            student_class.insert(enrollment.student_id.as_str(), enrollment.class_id.as_str());
        }
    }
    (student_ids, student_class)
}
