// ==========================================
// Pentwheel 跟踪服务 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 库存/维修/物流跟踪 CRUD 与统计报表
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 报表聚合
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// 配置层 - 启动配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MovementType, RepairPriority, ShipmentType, StatusType};

// 领域实体
pub use domain::{BudgetEntry, Company, Component, Repair, RepairComponent, Return, Shipment, StockMovement};

// 引擎
pub use engine::AnalyticsEngine;

// API
pub use api::{
    AnalyticsApi, ApiError, ApiResult, BudgetApi, CompanyApi, InventoryApi, RepairApi, ReturnApi,
    ShipmentApi,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Pentwheel API";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
