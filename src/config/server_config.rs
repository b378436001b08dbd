// ==========================================
// Pentwheel 跟踪服务 - 服务配置
// ==========================================
// 来源: 环境变量 (可由 .env 提供, 见 dotenvy)
// - PENTWHEEL_DB_PATH
// - PENTWHEEL_BIND_ADDR
// - PENTWHEEL_LOG_FORMAT
// - PENTWHEEL_MAX_PAGE_SIZE
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::api::validator::DEFAULT_MAX_PAGE_SIZE;
use crate::logging::LogFormat;

pub const ENV_DB_PATH: &str = "PENTWHEEL_DB_PATH";
pub const ENV_BIND_ADDR: &str = "PENTWHEEL_BIND_ADDR";
pub const ENV_LOG_FORMAT: &str = "PENTWHEEL_LOG_FORMAT";
pub const ENV_MAX_PAGE_SIZE: &str = "PENTWHEEL_MAX_PAGE_SIZE";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// 服务配置
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub db_path: String,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub max_page_size: u32,
}

impl ServerConfig {
    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取 (便于测试)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = get(ENV_DB_PATH).unwrap_or_else(default_db_path);

        let bind_addr = get(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: ENV_BIND_ADDR,
                message: e.to_string(),
            })?;

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: ENV_LOG_FORMAT,
                    message,
                })?,
            None => LogFormat::default(),
        };

        let max_page_size = match get(ENV_MAX_PAGE_SIZE) {
            Some(raw) => {
                let value = raw.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                    key: ENV_MAX_PAGE_SIZE,
                    message: e.to_string(),
                })?;
                if value == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_MAX_PAGE_SIZE,
                        message: "must be at least 1".to_string(),
                    });
                }
                value
            }
            None => DEFAULT_MAX_PAGE_SIZE,
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_format,
            max_page_size,
        })
    }
}

/// 默认数据库路径: <data dir>/pentwheel/pentwheel.db, 取不到数据目录时为 ./pentwheel.db
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./pentwheel.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("pentwheel");
        // 确保目录存在
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("pentwheel.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}, 使用当前目录", dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/pw.db"),
            (ENV_BIND_ADDR, "127.0.0.1:9000"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_MAX_PAGE_SIZE, "50"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, "/tmp/pw.db");
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_page_size, 50);
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[(ENV_DB_PATH, "x.db")])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.max_page_size, DEFAULT_MAX_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "x.db"),
            (ENV_BIND_ADDR, "not-an-addr")
        ]))
        .is_err());
        assert!(ServerConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "x.db"),
            (ENV_MAX_PAGE_SIZE, "0")
        ]))
        .is_err());
        assert!(ServerConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "x.db"),
            (ENV_LOG_FORMAT, "yaml")
        ]))
        .is_err());
    }
}
