// ==========================================
// Pentwheel 跟踪服务 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 每个方法只在自身语句期间持有连接锁
// ==========================================

pub mod analytics_repo;
pub mod budget_repo;
pub mod company_repo;
pub mod component_repo;
pub mod error;
pub mod repair_component_repo;
pub mod repair_repo;
pub mod return_repo;
pub(crate) mod row;
pub mod shipment_repo;
pub mod sql_builder;
pub mod stock_movement_repo;

// 重导出核心仓储
pub use analytics_repo::AnalyticsRepository;
pub use budget_repo::BudgetRepository;
pub use company_repo::CompanyRepository;
pub use component_repo::ComponentRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use repair_component_repo::RepairComponentRepository;
pub use repair_repo::RepairRepository;
pub use return_repo::ReturnRepository;
pub use shipment_repo::ShipmentRepository;
pub use sql_builder::{Page, SqlQueryBuilder};
pub use stock_movement_repo::StockMovementRepository;
