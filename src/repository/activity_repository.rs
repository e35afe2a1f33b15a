use crate::db::database::{Database, DatabaseTrait};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, QueryBuilder};
use std::sync::Arc;

use crate::model::activity::{
    AchievementRecord, ClassInfo, Enrollment, SessionRecord, StudentProfile, VocabularyItemRow,
};

#[derive(Clone)]
pub struct ActivityRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl ActivityRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

/// 活动数据只读接口，排行榜引擎不做任何写入
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// 老师名下的班级
    async fn fetch_owned_classes(&self, owner_id: &str) -> Result<Vec<ClassInfo>, sqlx::Error>;

    /// 班级选课记录
    async fn fetch_enrollments(&self, class_ids: &[String])
        -> Result<Vec<Enrollment>, sqlx::Error>;

    async fn fetch_profiles(
        &self,
        student_ids: &[String],
    ) -> Result<Vec<StudentProfile>, sqlx::Error>;

    /// 已结束的会话（`ended_at` 非空），开始时间不早于 `since`
    async fn fetch_sessions(
        &self,
        student_ids: &[String],
        since: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, sqlx::Error>;

    /// 成就按获得时间倒序，最多 `limit` 条
    async fn fetch_achievements(
        &self,
        student_ids: &[String],
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<AchievementRecord>, sqlx::Error>;

    /// 词汇收集表原始行，连胜和掌握词数在引擎里折叠
    async fn fetch_vocabulary_items(
        &self,
        student_ids: &[String],
    ) -> Result<Vec<VocabularyItemRow>, sqlx::Error>;

    /// 老师资料上的学校代码
    async fn fetch_school_code(&self, user_id: &str) -> Result<Option<String>, sqlx::Error>;

    /// 按名称查找机构
    async fn find_organization_by_name(&self, name: &str)
        -> Result<Option<String>, sqlx::Error>;

    async fn fetch_class_organization(&self, class_id: &str)
        -> Result<Option<String>, sqlx::Error>;

    async fn fetch_organization_classes(
        &self,
        organization_id: &str,
    ) -> Result<Vec<ClassInfo>, sqlx::Error>;
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn fetch_owned_classes(&self, owner_id: &str) -> Result<Vec<ClassInfo>, sqlx::Error> {
        let classes = sqlx::query_as::<_, ClassInfo>(
            "SELECT id, name FROM classes WHERE teacher_id = ? ORDER BY created_at, id",
        )
        .bind(owner_id)
        .fetch_all(self.db_conn.get_read_pool())
        .await?;
        tracing::debug!(
            "fetch_owned_classes - owner:{} | classes:{}",
            owner_id,
            classes.len()
        );
        Ok(classes)
    }

    async fn fetch_enrollments(
        &self,
        class_ids: &[String],
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        if class_ids.is_empty() {
            return Ok(vec![]);
        }
        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT student_id, class_id FROM class_enrollments WHERE class_id",
        );
        push_in_list(&mut qb, class_ids);
        qb.push(" ORDER BY enrolled_at, student_id");
        qb.build_query_as::<Enrollment>()
            .fetch_all(self.db_conn.get_read_pool())
            .await
    }

    async fn fetch_profiles(
        &self,
        student_ids: &[String],
    ) -> Result<Vec<StudentProfile>, sqlx::Error> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }
        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT user_id, display_name, email FROM user_profiles WHERE user_id",
        );
        push_in_list(&mut qb, student_ids);
        qb.build_query_as::<StudentProfile>()
            .fetch_all(self.db_conn.get_read_pool())
            .await
    }

    async fn fetch_sessions(
        &self,
        student_ids: &[String],
        since: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, sqlx::Error> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }
        // 数值列统一转成 DOUBLE，非法值按 NULL/0 读出
        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT id, student_id, game_type, \
             CAST(final_score AS DOUBLE) AS final_score, \
             CAST(accuracy_percentage AS DOUBLE) AS accuracy_percentage, \
             CAST(completion_percentage AS DOUBLE) AS completion_percentage, \
             CAST(duration_seconds AS DOUBLE) AS duration_seconds, \
             started_at, ended_at, \
             CAST(xp_earned AS DOUBLE) AS xp_earned, \
             CAST(gems_total AS DOUBLE) AS gems_total \
             FROM enhanced_game_sessions WHERE student_id",
        );
        push_in_list(&mut qb, student_ids);
        qb.push(" AND started_at >= ");
        qb.push_bind(since);
        qb.push(" AND ended_at IS NOT NULL ORDER BY started_at, id");
        let sessions = qb
            .build_query_as::<SessionRecord>()
            .fetch_all(self.db_conn.get_read_pool())
            .await?;
        tracing::debug!(
            "fetch_sessions - students:{} | since:{} | sessions:{}",
            student_ids.len(),
            since,
            sessions.len()
        );
        Ok(sessions)
    }

    async fn fetch_achievements(
        &self,
        student_ids: &[String],
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<AchievementRecord>, sqlx::Error> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }
        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT student_id, title, rarity, \
             CAST(points_awarded AS DOUBLE) AS points_awarded, earned_at \
             FROM student_achievements WHERE student_id",
        );
        push_in_list(&mut qb, student_ids);
        qb.push(" AND earned_at >= ");
        qb.push_bind(since);
        qb.push(" ORDER BY earned_at DESC LIMIT ");
        qb.push_bind(limit);
        qb.build_query_as::<AchievementRecord>()
            .fetch_all(self.db_conn.get_read_pool())
            .await
    }

    async fn fetch_vocabulary_items(
        &self,
        student_ids: &[String],
    ) -> Result<Vec<VocabularyItemRow>, sqlx::Error> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }
        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT student_id, \
             CAST(current_streak AS DOUBLE) AS current_streak, \
             CAST(best_streak AS DOUBLE) AS best_streak, \
             CAST(mastery_level AS DOUBLE) AS mastery_level \
             FROM vocabulary_gem_collection WHERE student_id",
        );
        push_in_list(&mut qb, student_ids);
        qb.build_query_as::<VocabularyItemRow>()
            .fetch_all(self.db_conn.get_read_pool())
            .await
    }

    async fn fetch_school_code(&self, user_id: &str) -> Result<Option<String>, sqlx::Error> {
        let code: Option<Option<String>> =
            sqlx::query_scalar("SELECT school_initials FROM user_profiles WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(self.db_conn.get_read_pool())
                .await?;
        Ok(code.flatten().filter(|c| !c.trim().is_empty()))
    }

    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM organizations WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(self.db_conn.get_read_pool())
            .await
    }

    async fn fetch_class_organization(
        &self,
        class_id: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let organization: Option<Option<String>> =
            sqlx::query_scalar("SELECT organization_id FROM classes WHERE id = ?")
                .bind(class_id)
                .fetch_optional(self.db_conn.get_read_pool())
                .await?;
        Ok(organization.flatten())
    }

    async fn fetch_organization_classes(
        &self,
        organization_id: &str,
    ) -> Result<Vec<ClassInfo>, sqlx::Error> {
        sqlx::query_as::<_, ClassInfo>(
            "SELECT id, name FROM classes WHERE organization_id = ? ORDER BY created_at, id",
        )
        .bind(organization_id)
        .fetch_all(self.db_conn.get_read_pool())
        .await
    }
}

/// 拼接 ` IN (?, ?, ...)`，调用方保证列表非空
fn push_in_list<'args>(qb: &mut QueryBuilder<'args, MySql>, ids: &'args [String]) {
    qb.push(" IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(id.as_str());
    }
    separated.push_unseparated(")");
}
