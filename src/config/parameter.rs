use std::str::FromStr;

use dotenv;

pub fn init() {
    // .env 文件可选，生产环境直接走环境变量
    dotenv::dotenv().ok();
    // 给日志库设置环境变量
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info")
    }
    if std::env::var_os("PORT").is_none() {
        std::env::set_var("PORT", "8080")
    }
    if std::env::var_os("DB_URL").is_none() {
        panic!("config -- env var `DB_URL` is not exist ");
    }
}

pub fn get(parameter: &str) -> String {
    let env_parameter = std::env::var(parameter)
        .unwrap_or_else(|_| panic!("{} is not defined in the environment.", parameter));
    return env_parameter;
}

/// 读取可选参数，缺失或解析失败时回退到默认值
pub fn get_or<T: FromStr>(parameter: &str, default: T) -> T {
    match std::env::var(parameter) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    "config -- env var `{}` has invalid value `{}`, using default",
                    parameter,
                    raw
                );
                default
            }
        },
        Err(_) => default,
    }
}

// all_time 时间窗口的起点
// 2024/01/01 00:00:00 UTC
pub const PLATFORM_EPOCH: &str = "2024-01-01T00:00:00Z";
