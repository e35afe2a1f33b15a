//! 全校范围的机构解析：依次尝试各个策略，都失败时退回"我的班级"

use crate::model::activity::ClassInfo;
use crate::repository::activity_repository::ActivityStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedScope {
    Organization(String),
    MyClasses,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrganizationResolver {
    /// 老师资料上的学校代码 -> 同名机构
    SchoolCode,
    /// 老师第一个班级所属的机构
    ClassOrganization,
}

pub const ORGANIZATION_RESOLVERS: [OrganizationResolver; 2] = [
    OrganizationResolver::SchoolCode,
    OrganizationResolver::ClassOrganization,
];

impl OrganizationResolver {
    /// `Ok(None)` 表示交给下一个策略
    pub async fn resolve<S: ActivityStore + ?Sized>(
        &self,
        store: &S,
        requester_id: &str,
        owned_classes: &[ClassInfo],
    ) -> Result<Option<String>, sqlx::Error> {
        match self {
            OrganizationResolver::SchoolCode => {
                match store.fetch_school_code(requester_id).await? {
                    Some(code) => store.find_organization_by_name(&code).await,
                    None => Ok(None),
                }
            }
            OrganizationResolver::ClassOrganization => match owned_classes.first() {
                Some(class) => store.fetch_class_organization(&class.id).await,
                None => Ok(None),
            },
        }
    }
}

pub async fn resolve_organization_scope<S: ActivityStore + ?Sized>(
    store: &S,
    requester_id: &str,
    owned_classes: &[ClassInfo],
) -> Result<ResolvedScope, sqlx::Error> {
    for resolver in ORGANIZATION_RESOLVERS {
        if let Some(organization_id) = resolver.resolve(store, requester_id, owned_classes).await? {
            tracing::debug!(
                "resolve_scope - requester:{} | resolver:{:?} | organization:{}",
                requester_id,
                resolver,
                organization_id
            );
            return Ok(ResolvedScope::Organization(organization_id));
        }
    }
    tracing::debug!(
        "resolve_scope - requester:{} | organization unresolved, using my-classes",
        requester_id
    );
    Ok(ResolvedScope::MyClasses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::activity_repository::MockActivityStore;
    use mockall::predicate::eq;

    fn classes() -> Vec<ClassInfo> {
        vec![ClassInfo {
            id: "c1".to_string(),
            name: "7B".to_string(),
        }]
    }

    #[tokio::test]
    async fn school_code_wins_when_it_matches_an_organization() {
        let mut store = MockActivityStore::new();
        store
            .expect_fetch_school_code()
            .with(eq("t1"))
            .returning(|_| Ok(Some("HHS".to_string())));
        store
            .expect_find_organization_by_name()
            .with(eq("HHS"))
            .returning(|_| Ok(Some("org-1".to_string())));
        store.expect_fetch_class_organization().never();

        let scope = resolve_organization_scope(&store, "t1", &classes()).await.unwrap();
        assert_eq!(scope, ResolvedScope::Organization("org-1".to_string()));
    }

    #[tokio::test]
    async fn falls_through_to_class_organization() {
        let mut store = MockActivityStore::new();
        store.expect_fetch_school_code().returning(|_| Ok(None));
        store
            .expect_fetch_class_organization()
            .with(eq("c1"))
            .returning(|_| Ok(Some("org-2".to_string())));

        let scope = resolve_organization_scope(&store, "t1", &classes()).await.unwrap();
        assert_eq!(scope, ResolvedScope::Organization("org-2".to_string()));
    }

    #[tokio::test]
    async fn unknown_school_code_also_falls_through() {
        let mut store = MockActivityStore::new();
        store
            .expect_fetch_school_code()
            .returning(|_| Ok(Some("NOPE".to_string())));
        store.expect_find_organization_by_name().returning(|_| Ok(None));
        store.expect_fetch_class_organization().returning(|_| Ok(None));

        let scope = resolve_organization_scope(&store, "t1", &classes()).await.unwrap();
        assert_eq!(scope, ResolvedScope::MyClasses);
    }

    #[tokio::test]
    async fn no_classes_and_no_code_degrades_to_my_classes() {
        let mut store = MockActivityStore::new();
        store.expect_fetch_school_code().returning(|_| Ok(None));
        store.expect_fetch_class_organization().never();

        let scope = resolve_organization_scope(&store, "t1", &[]).await.unwrap();
        assert_eq!(scope, ResolvedScope::MyClasses);
    }

    #[tokio::test]
    async fn read_failures_are_not_swallowed() {
        let mut store = MockActivityStore::new();
        store
            .expect_fetch_school_code()
            .returning(|_| Err(sqlx::Error::PoolTimedOut));

        let result = resolve_organization_scope(&store, "t1", &classes()).await;
        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
    }
}
