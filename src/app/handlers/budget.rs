// ==========================================
// 周预算接口
// ==========================================

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::common::{run_blocking, HttpResult, MessageResponse, Pagination};
use crate::app::state::AppState;
use crate::domain::budget::{BudgetEntry, BudgetEntryFilter, BudgetEntryPatch, NewBudgetEntry};

#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub week_start: Option<NaiveDate>,
}

/// GET /budget-entries/
pub async fn list_budget_entries(
    State(state): State<AppState>,
    Query(query): Query<BudgetListQuery>,
) -> HttpResult<Vec<BudgetEntry>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = BudgetEntryFilter {
        category: query.category,
        week_start: query.week_start,
    };
    let api = state.budget_api.clone();
    run_blocking(move || api.list_budget_entries(&filter, page)).await
}

/// POST /budget-entries/
pub async fn create_budget_entry(
    State(state): State<AppState>,
    Json(new): Json<NewBudgetEntry>,
) -> HttpResult<BudgetEntry> {
    let api = state.budget_api.clone();
    run_blocking(move || api.create_budget_entry(new)).await
}

/// GET /budget-entries/:id
pub async fn get_budget_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<BudgetEntry> {
    let api = state.budget_api.clone();
    run_blocking(move || api.get_budget_entry(id)).await
}

/// PUT /budget-entries/:id
pub async fn update_budget_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BudgetEntryPatch>,
) -> HttpResult<BudgetEntry> {
    let api = state.budget_api.clone();
    run_blocking(move || api.update_budget_entry(id, patch)).await
}

/// DELETE /budget-entries/:id
pub async fn delete_budget_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.budget_api.clone();
    run_blocking(move || api.delete_budget_entry(id)).await?;
    Ok(MessageResponse::deleted("Budget entry"))
}
