// ==========================================
// Pentwheel 跟踪服务 - 领域模型层
// ==========================================
// 职责: 定义领域实体、新建请求、局部更新结构、报表行
// 红线: 不含数据访问逻辑
// ==========================================

pub mod analytics;
pub mod budget;
pub mod company;
pub mod component;
pub mod money;
pub mod patch;
pub mod repair;
pub mod returns;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use analytics::{
    CategoryVariance, DashboardCounts, DashboardMetrics, LowStockComponent, RepairPriorityGroup,
    RepairPrioritySummary, RepairStatusGroup, RepairStatusSummary, ShipmentGroup,
    ShipmentStatusSummary, StockLevelRow, WeeklyBudgetSummary,
};
pub use budget::{BudgetEntry, BudgetEntryFilter, BudgetEntryPatch, NewBudgetEntry};
pub use company::{Company, CompanyPatch, NewCompany};
pub use component::{
    Component, ComponentFilter, ComponentPatch, NewComponent, NewStockMovement, StockMovement,
    StockMovementFilter,
};
pub use repair::{
    NewRepair, NewRepairComponent, Repair, RepairComponent, RepairComponentFilter,
    RepairComponentPatch, RepairComponentView, RepairFilter, RepairPatch, RepairView,
};
pub use returns::{NewReturn, Return, ReturnFilter, ReturnPatch};
pub use shipment::{NewShipment, Shipment, ShipmentFilter, ShipmentPatch};
pub use types::{MovementType, ParseEnumError, RepairPriority, ShipmentType, StatusType};
