// ==========================================
// 退货接口
// ==========================================

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::common::{run_blocking, HttpResult, MessageResponse, Pagination};
use crate::app::state::AppState;
use crate::domain::returns::{NewReturn, Return, ReturnFilter, ReturnPatch};
use crate::domain::types::StatusType;

#[derive(Debug, Deserialize)]
pub struct ReturnListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<StatusType>,
}

/// GET /returns/
pub async fn list_returns(
    State(state): State<AppState>,
    Query(query): Query<ReturnListQuery>,
) -> HttpResult<Vec<Return>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = ReturnFilter {
        status: query.status,
    };
    let api = state.return_api.clone();
    run_blocking(move || api.list_returns(&filter, page)).await
}

/// POST /returns/
pub async fn create_return(
    State(state): State<AppState>,
    Json(new): Json<NewReturn>,
) -> HttpResult<Return> {
    let api = state.return_api.clone();
    run_blocking(move || api.create_return(new)).await
}

/// GET /returns/:id
pub async fn get_return(State(state): State<AppState>, Path(id): Path<Uuid>) -> HttpResult<Return> {
    let api = state.return_api.clone();
    run_blocking(move || api.get_return(id)).await
}

/// PUT /returns/:id
pub async fn update_return(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReturnPatch>,
) -> HttpResult<Return> {
    let api = state.return_api.clone();
    run_blocking(move || api.update_return(id, patch)).await
}

/// DELETE /returns/:id
pub async fn delete_return(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.return_api.clone();
    run_blocking(move || api.delete_return(id)).await?;
    Ok(MessageResponse::deleted("Return"))
}
