// ==========================================
// Pentwheel 跟踪服务 - 统计报表数据结构
// ==========================================
// 分组原始行 (由 AnalyticsRepository 产出)
// 报表行 (由 engine::analytics 整形, 直接序列化为响应)
// ==========================================

use crate::domain::types::{RepairPriority, ShipmentType, StatusType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// 分组原始行
// ==========================================

/// 维修单按状态分组 (总费用可能为空)
#[derive(Debug, Clone, PartialEq)]
pub struct RepairStatusGroup {
    pub status: StatusType,
    pub count: i64,
    pub total_cost: Option<Decimal>,
}

/// 维修单按优先级分组
#[derive(Debug, Clone, PartialEq)]
pub struct RepairPriorityGroup {
    pub priority: RepairPriority,
    pub count: i64,
}

/// 发运单按 (类型, 状态) 分组 (件数可能为空)
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentGroup {
    pub shipment_type: ShipmentType,
    pub status: StatusType,
    pub count: i64,
    pub total_units: Option<i64>,
}

/// 低库存候选零部件
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevelRow {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub current_stock: i64,
    pub reorder_level: i64,
}

// ==========================================
// 报表行
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairStatusSummary {
    pub status: StatusType,
    pub count: i64,
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairPrioritySummary {
    pub priority: RepairPriority,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockComponent {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub current_stock: i64,
    pub reorder_level: i64,
    /// reorder_level - current_stock, 对返回行恒 >= 0
    pub difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentStatusSummary {
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    pub status: StatusType,
    pub count: i64,
    pub total_units: i64,
}

/// 周预算差异报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBudgetSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_budgeted: Decimal,
    pub total_actual: Decimal,
    pub variance: Decimal,
    pub variance_percentage: Decimal,
    pub categories: Vec<CategoryVariance>,
}

/// 单类目差异 (不做类目合并)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVariance {
    pub category: String,
    pub budgeted_amount: Decimal,
    pub actual_amount: Decimal,
    pub variance: Decimal,
    pub description: Option<String>,
}

/// 驾驶舱指标原始计数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardCounts {
    pub incoming_shipments: i64,
    pub outgoing_shipments: i64,
    pub total_budget: Decimal,
    pub total_used: Decimal,
}

/// 驾驶舱指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub week_start: NaiveDate,
    pub incoming_shipments: i64,
    pub outgoing_shipments: i64,
    pub total_budget: Decimal,
    pub total_used: Decimal,
    pub budget_remaining: Decimal,
}
