// ==========================================
// 统计报表接口 (只读)
// ==========================================

use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{run_blocking, HttpResult};
use crate::app::state::AppState;
use crate::domain::analytics::{
    DashboardMetrics, LowStockComponent, RepairPrioritySummary, RepairStatusSummary,
    ShipmentStatusSummary, WeeklyBudgetSummary,
};

#[derive(Debug, Deserialize)]
pub struct WeeklySummaryQuery {
    pub week_start: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub as_of: Option<NaiveDate>,
}

/// GET /analytics/repairs/status-summary
pub async fn repair_status_summary(
    State(state): State<AppState>,
) -> HttpResult<Vec<RepairStatusSummary>> {
    let api = state.analytics_api.clone();
    run_blocking(move || api.repair_status_summary()).await
}

/// GET /analytics/repairs/priority-summary
pub async fn repair_priority_summary(
    State(state): State<AppState>,
) -> HttpResult<Vec<RepairPrioritySummary>> {
    let api = state.analytics_api.clone();
    run_blocking(move || api.repair_priority_summary()).await
}

/// GET /analytics/components/low-stock
pub async fn low_stock_components(
    State(state): State<AppState>,
) -> HttpResult<Vec<LowStockComponent>> {
    let api = state.analytics_api.clone();
    run_blocking(move || api.low_stock_components()).await
}

/// GET /analytics/shipments/status-summary
pub async fn shipment_status_summary(
    State(state): State<AppState>,
) -> HttpResult<Vec<ShipmentStatusSummary>> {
    let api = state.analytics_api.clone();
    run_blocking(move || api.shipment_status_summary()).await
}

/// GET /analytics/budget/weekly-summary?week_start=YYYY-MM-DD
pub async fn weekly_budget_summary(
    State(state): State<AppState>,
    Query(query): Query<WeeklySummaryQuery>,
) -> HttpResult<WeeklyBudgetSummary> {
    let api = state.analytics_api.clone();
    run_blocking(move || api.weekly_budget_summary(query.week_start)).await
}

/// GET /analytics/dashboard?as_of=YYYY-MM-DD (默认今天, UTC)
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HttpResult<DashboardMetrics> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let api = state.analytics_api.clone();
    run_blocking(move || api.dashboard_metrics(as_of)).await
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Pentwheel API is running".to_string(),
    })
}
