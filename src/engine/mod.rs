// ==========================================
// Pentwheel 跟踪服务 - 引擎层
// ==========================================
// 职责: 实现报表聚合规则,不拼 SQL
// 红线: Engine 只读, 不修改任何实体
// ==========================================

pub mod analytics;

// 重导出核心引擎
pub use analytics::{variance_percentage, week_start_sunday, AnalyticsEngine};
