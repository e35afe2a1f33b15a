use crate::config::parameter;
use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{Error, MySql, Pool};

/// 排行榜只读，连只读库（或从库）即可
pub struct Database {
    read_pool: Pool<MySql>,
}

#[async_trait]
pub trait DatabaseTrait {
    async fn init() -> Result<Self, Error>
    where
        Self: Sized;
    fn get_read_pool(&self) -> &Pool<MySql>;
}

#[async_trait]
impl DatabaseTrait for Database {
    async fn init() -> Result<Self, Error> {
        let database_url = parameter::get("DB_URL");
        let read_pool = MySqlPoolOptions::new()
            .max_connections(parameter::get_or("DB_MAX_CONNECTIONS", 10))
            .max_lifetime(std::time::Duration::from_secs(6 * 60 * 60))
            .connect(&database_url)
            .await?;

        Ok(Self { read_pool })
    }

    fn get_read_pool(&self) -> &Pool<MySql> {
        &self.read_pool
    }
}
