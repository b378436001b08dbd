// ==========================================
// 维修单 / 维修用料接口
// ==========================================

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::common::{run_blocking, HttpResult, MessageResponse, Pagination};
use crate::app::state::AppState;
use crate::domain::repair::{
    NewRepair, NewRepairComponent, RepairComponentFilter, RepairComponentPatch,
    RepairComponentView, RepairFilter, RepairPatch, RepairView,
};
use crate::domain::types::{RepairPriority, StatusType};

#[derive(Debug, Deserialize)]
pub struct RepairListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<StatusType>,
    pub priority: Option<RepairPriority>,
}

#[derive(Debug, Deserialize)]
pub struct RepairComponentListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub repair_id: Option<Uuid>,
}

// ==========================================
// 维修单
// ==========================================

/// GET /repairs/
pub async fn list_repairs(
    State(state): State<AppState>,
    Query(query): Query<RepairListQuery>,
) -> HttpResult<Vec<RepairView>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = RepairFilter {
        status: query.status,
        priority: query.priority,
    };
    let api = state.repair_api.clone();
    run_blocking(move || api.list_repairs(&filter, page)).await
}

/// POST /repairs/
pub async fn create_repair(
    State(state): State<AppState>,
    Json(new): Json<NewRepair>,
) -> HttpResult<RepairView> {
    let api = state.repair_api.clone();
    run_blocking(move || api.create_repair(new)).await
}

/// GET /repairs/:id
pub async fn get_repair(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<RepairView> {
    let api = state.repair_api.clone();
    run_blocking(move || api.get_repair(id)).await
}

/// PUT /repairs/:id
pub async fn update_repair(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<RepairPatch>,
) -> HttpResult<RepairView> {
    let api = state.repair_api.clone();
    run_blocking(move || api.update_repair(id, patch)).await
}

/// DELETE /repairs/:id
pub async fn delete_repair(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.repair_api.clone();
    run_blocking(move || api.delete_repair(id)).await?;
    Ok(MessageResponse::deleted("Repair"))
}

// ==========================================
// 维修用料
// ==========================================

/// GET /repair-components/
pub async fn list_repair_components(
    State(state): State<AppState>,
    Query(query): Query<RepairComponentListQuery>,
) -> HttpResult<Vec<RepairComponentView>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = RepairComponentFilter {
        repair_id: query.repair_id,
    };
    let api = state.repair_api.clone();
    run_blocking(move || api.list_repair_components(&filter, page)).await
}

/// POST /repair-components/
pub async fn create_repair_component(
    State(state): State<AppState>,
    Json(new): Json<NewRepairComponent>,
) -> HttpResult<RepairComponentView> {
    let api = state.repair_api.clone();
    run_blocking(move || api.create_repair_component(new)).await
}

/// GET /repair-components/:id
pub async fn get_repair_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<RepairComponentView> {
    let api = state.repair_api.clone();
    run_blocking(move || api.get_repair_component(id)).await
}

/// PUT /repair-components/:id
pub async fn update_repair_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<RepairComponentPatch>,
) -> HttpResult<RepairComponentView> {
    let api = state.repair_api.clone();
    run_blocking(move || api.update_repair_component(id, patch)).await
}

/// DELETE /repair-components/:id
pub async fn delete_repair_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.repair_api.clone();
    run_blocking(move || api.delete_repair_component(id)).await?;
    Ok(MessageResponse::deleted("Repair component"))
}
