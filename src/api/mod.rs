// ==========================================
// Pentwheel 跟踪服务 - API 层
// ==========================================
// 职责: 输入校验、引用存在性检查、局部更新合并、错误转换
// 红线: API 层不拼 SQL
// ==========================================

pub mod analytics_api;
pub mod budget_api;
pub mod company_api;
pub mod error;
pub mod inventory_api;
pub mod repair_api;
pub mod return_api;
pub mod shipment_api;
pub mod validator;

pub use analytics_api::AnalyticsApi;
pub use budget_api::BudgetApi;
pub use company_api::CompanyApi;
pub use error::{ApiError, ApiResult};
pub use inventory_api::InventoryApi;
pub use repair_api::RepairApi;
pub use return_api::ReturnApi;
pub use shipment_api::ShipmentApi;
