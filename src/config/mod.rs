// ==========================================
// Pentwheel 跟踪服务 - 配置层
// ==========================================
// 职责: 启动配置读取 (环境变量 / .env)
// ==========================================

pub mod server_config;

pub use server_config::{default_db_path, ConfigError, ServerConfig};
