// ==========================================
// Pentwheel 跟踪服务 - 统计报表引擎
// ==========================================
// 职责: 将分组原始行整形为报表行, 计算派生字段
// 输入: AnalyticsRepository / BudgetRepository 的查询结果
// 输出: domain::analytics 报表行
// ==========================================
// 红线: Engine 不拼 SQL, 金额只用 Decimal 计算
// ==========================================

use crate::domain::analytics::{
    CategoryVariance, DashboardCounts, DashboardMetrics, LowStockComponent, RepairPriorityGroup,
    RepairPrioritySummary, RepairStatusGroup, RepairStatusSummary, ShipmentGroup,
    ShipmentStatusSummary, StockLevelRow, WeeklyBudgetSummary,
};
use crate::domain::budget::BudgetEntry;
use crate::domain::money;
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// variance_percentage 保留的小数位数
pub const PERCENTAGE_SCALE: u32 = 4;

// ==========================================
// AnalyticsEngine - 统计报表引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// 创建新的统计报表引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 维修汇总
    // ==========================================

    /// 维修单状态汇总
    ///
    /// 只输出出现过的状态; 无费用数据的分组 total_cost 为 0.00
    pub fn summarize_repair_status(&self, groups: Vec<RepairStatusGroup>) -> Vec<RepairStatusSummary> {
        let mut rows: Vec<RepairStatusSummary> = groups
            .into_iter()
            .map(|g| RepairStatusSummary {
                status: g.status,
                count: g.count,
                total_cost: money::normalize(g.total_cost.unwrap_or(Decimal::ZERO)),
            })
            .collect();
        rows.sort_by_key(|r| r.status);
        rows
    }

    /// 维修单优先级汇总
    pub fn summarize_repair_priority(
        &self,
        groups: Vec<RepairPriorityGroup>,
    ) -> Vec<RepairPrioritySummary> {
        let mut rows: Vec<RepairPrioritySummary> = groups
            .into_iter()
            .map(|g| RepairPrioritySummary {
                priority: g.priority,
                count: g.count,
            })
            .collect();
        rows.sort_by_key(|r| r.priority);
        rows
    }

    // ==========================================
    // 低库存
    // ==========================================

    /// 低库存检测 (current_stock <= reorder_level, 含等于)
    ///
    /// 输入行即使未经 SQL 过滤也会在此再判定一次
    /// 输出按 current_stock 升序, 同值按名称
    pub fn detect_low_stock(&self, rows: Vec<StockLevelRow>) -> Vec<LowStockComponent> {
        let mut low: Vec<LowStockComponent> = rows
            .into_iter()
            .filter(|r| r.current_stock <= r.reorder_level)
            .map(|r| LowStockComponent {
                difference: r.reorder_level - r.current_stock,
                id: r.id,
                name: r.name,
                sku: r.sku,
                current_stock: r.current_stock,
                reorder_level: r.reorder_level,
            })
            .collect();
        low.sort_by(|a, b| {
            a.current_stock
                .cmp(&b.current_stock)
                .then_with(|| a.name.cmp(&b.name))
        });
        low
    }

    // ==========================================
    // 发运交叉表
    // ==========================================

    /// 发运 (方向 × 状态) 汇总, 无 total_units 的分组记为 0
    pub fn summarize_shipments(&self, groups: Vec<ShipmentGroup>) -> Vec<ShipmentStatusSummary> {
        let mut rows: Vec<ShipmentStatusSummary> = groups
            .into_iter()
            .map(|g| ShipmentStatusSummary {
                shipment_type: g.shipment_type,
                status: g.status,
                count: g.count,
                total_units: g.total_units.unwrap_or(0),
            })
            .collect();
        rows.sort_by_key(|r| (r.shipment_type, r.status));
        rows
    }

    // ==========================================
    // 周预算差异
    // ==========================================

    /// 周预算差异报表
    ///
    /// # 参数
    /// - `week_start`: 查询周起始日 (精确匹配)
    /// - `entries`: 该周全部预算条目
    ///
    /// # 返回
    /// - None: 该周无条目
    /// - week_end 取第一条条目的值, 不校验各条目是否一致
    /// - total_budgeted 为 0 时 variance_percentage 记为 0
    pub fn weekly_budget_summary(
        &self,
        week_start: NaiveDate,
        entries: &[BudgetEntry],
    ) -> Option<WeeklyBudgetSummary> {
        let first = entries.first()?;

        let total_budgeted: Decimal = entries.iter().map(|e| e.budgeted_amount).sum();
        let total_actual: Decimal = entries.iter().map(|e| e.actual_amount).sum();
        let variance = total_actual - total_budgeted;

        let categories = entries
            .iter()
            .map(|e| CategoryVariance {
                category: e.category.clone(),
                budgeted_amount: money::normalize(e.budgeted_amount),
                actual_amount: money::normalize(e.actual_amount),
                variance: money::normalize(e.variance()),
                description: e.description.clone(),
            })
            .collect();

        Some(WeeklyBudgetSummary {
            week_start,
            week_end: first.week_end,
            total_budgeted: money::normalize(total_budgeted),
            total_actual: money::normalize(total_actual),
            variance: money::normalize(variance),
            variance_percentage: variance_percentage(variance, total_budgeted),
            categories,
        })
    }

    // ==========================================
    // 驾驶舱
    // ==========================================

    /// 驾驶舱指标
    pub fn dashboard_metrics(&self, week_start: NaiveDate, counts: DashboardCounts) -> DashboardMetrics {
        DashboardMetrics {
            week_start,
            incoming_shipments: counts.incoming_shipments,
            outgoing_shipments: counts.outgoing_shipments,
            budget_remaining: money::normalize(counts.total_budget - counts.total_used),
            total_budget: money::normalize(counts.total_budget),
            total_used: money::normalize(counts.total_used),
        }
    }
}

/// variance / total_budgeted × 100, 分母非正时为 0
pub fn variance_percentage(variance: Decimal, total_budgeted: Decimal) -> Decimal {
    if total_budgeted <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (variance / total_budgeted * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENTAGE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// as_of 当天或之前最近的周日
pub fn week_start_sunday(as_of: NaiveDate) -> NaiveDate {
    as_of - Duration::days(i64::from(as_of.weekday().num_days_from_sunday()))
}
