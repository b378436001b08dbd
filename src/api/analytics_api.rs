// ==========================================
// Pentwheel 跟踪服务 - 统计报表 API
// ==========================================
// 职责: 报表查询 (只读), 每次请求基于当前数据重新计算
// 流程: AnalyticsRepository 分组查询 -> AnalyticsEngine 整形/派生
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::analytics::{
    DashboardMetrics, LowStockComponent, RepairPrioritySummary, RepairStatusSummary,
    ShipmentStatusSummary, WeeklyBudgetSummary,
};
use crate::engine::analytics::{week_start_sunday, AnalyticsEngine};
use crate::repository::analytics_repo::AnalyticsRepository;
use crate::repository::budget_repo::BudgetRepository;

// ==========================================
// AnalyticsApi
// ==========================================
pub struct AnalyticsApi {
    analytics_repo: Arc<AnalyticsRepository>,
    budget_repo: Arc<BudgetRepository>,
    engine: AnalyticsEngine,
}

impl AnalyticsApi {
    pub fn new(analytics_repo: Arc<AnalyticsRepository>, budget_repo: Arc<BudgetRepository>) -> Self {
        Self {
            analytics_repo,
            budget_repo,
            engine: AnalyticsEngine::new(),
        }
    }

    /// 维修单状态汇总
    #[instrument(skip(self))]
    pub fn repair_status_summary(&self) -> ApiResult<Vec<RepairStatusSummary>> {
        let groups = self.analytics_repo.repair_status_groups()?;
        let rows = self.engine.summarize_repair_status(groups);
        tracing::debug!(rows = rows.len(), "维修状态汇总完成");
        Ok(rows)
    }

    /// 维修单优先级汇总
    #[instrument(skip(self))]
    pub fn repair_priority_summary(&self) -> ApiResult<Vec<RepairPrioritySummary>> {
        let groups = self.analytics_repo.repair_priority_groups()?;
        let rows = self.engine.summarize_repair_priority(groups);
        tracing::debug!(rows = rows.len(), "维修优先级汇总完成");
        Ok(rows)
    }

    /// 低库存零部件 (不分页)
    #[instrument(skip(self))]
    pub fn low_stock_components(&self) -> ApiResult<Vec<LowStockComponent>> {
        let rows = self.analytics_repo.low_stock_rows()?;
        let low = self.engine.detect_low_stock(rows);
        tracing::debug!(rows = low.len(), "低库存检测完成");
        Ok(low)
    }

    /// 发运 (方向 × 状态) 汇总
    #[instrument(skip(self))]
    pub fn shipment_status_summary(&self) -> ApiResult<Vec<ShipmentStatusSummary>> {
        let groups = self.analytics_repo.shipment_groups()?;
        let rows = self.engine.summarize_shipments(groups);
        tracing::debug!(rows = rows.len(), "发运汇总完成");
        Ok(rows)
    }

    /// 周预算差异
    ///
    /// 该周无任何条目时返回 NotFound (而非空报表)
    #[instrument(skip(self), fields(week_start = %week_start))]
    pub fn weekly_budget_summary(&self, week_start: NaiveDate) -> ApiResult<WeeklyBudgetSummary> {
        let entries = self.budget_repo.find_by_week_start(week_start)?;
        tracing::debug!(entries = entries.len(), "周预算条目已读取");

        self.engine
            .weekly_budget_summary(week_start, &entries)
            .ok_or_else(|| ApiError::NotFound("No budget entries found for this week".to_string()))
    }

    /// 驾驶舱指标 (as_of 所在周, 周日起算)
    #[instrument(skip(self), fields(as_of = %as_of))]
    pub fn dashboard_metrics(&self, as_of: NaiveDate) -> ApiResult<DashboardMetrics> {
        let week_start = week_start_sunday(as_of);
        let counts = self.analytics_repo.dashboard_counts(week_start)?;
        Ok(self.engine.dashboard_metrics(week_start, counts))
    }
}
