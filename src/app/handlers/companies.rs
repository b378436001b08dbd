// ==========================================
// 公司接口
// ==========================================

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use super::common::{run_blocking, HttpResult, MessageResponse, Pagination};
use crate::app::state::AppState;
use crate::domain::company::{Company, CompanyPatch, NewCompany};

/// GET /companies/
pub async fn list_companies(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> HttpResult<Vec<Company>> {
    let page = pagination.page(&state);
    let api = state.company_api.clone();
    run_blocking(move || api.list_companies(page)).await
}

/// POST /companies/
pub async fn create_company(
    State(state): State<AppState>,
    Json(new): Json<NewCompany>,
) -> HttpResult<Company> {
    let api = state.company_api.clone();
    run_blocking(move || api.create_company(new)).await
}

/// GET /companies/:id
pub async fn get_company(State(state): State<AppState>, Path(id): Path<Uuid>) -> HttpResult<Company> {
    let api = state.company_api.clone();
    run_blocking(move || api.get_company(id)).await
}

/// PUT /companies/:id
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CompanyPatch>,
) -> HttpResult<Company> {
    let api = state.company_api.clone();
    run_blocking(move || api.update_company(id, patch)).await
}

/// DELETE /companies/:id
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.company_api.clone();
    run_blocking(move || api.delete_company(id)).await?;
    Ok(MessageResponse::deleted("Company"))
}
