// ==========================================
// 零部件 / 库存变动接口
// ==========================================

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::common::{run_blocking, HttpResult, MessageResponse, Pagination};
use crate::app::state::AppState;
use crate::domain::component::{
    Component, ComponentFilter, ComponentPatch, NewComponent, NewStockMovement, StockMovement,
    StockMovementFilter,
};
use crate::domain::types::MovementType;

#[derive(Debug, Deserialize)]
pub struct ComponentListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    #[serde(default)]
    pub low_stock: bool,
}

#[derive(Debug, Deserialize)]
pub struct StockMovementListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub component_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
}

// ==========================================
// 零部件
// ==========================================

/// GET /components/
pub async fn list_components(
    State(state): State<AppState>,
    Query(query): Query<ComponentListQuery>,
) -> HttpResult<Vec<Component>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = ComponentFilter {
        category: query.category,
        low_stock: query.low_stock,
    };
    let api = state.inventory_api.clone();
    run_blocking(move || api.list_components(&filter, page)).await
}

/// POST /components/
pub async fn create_component(
    State(state): State<AppState>,
    Json(new): Json<NewComponent>,
) -> HttpResult<Component> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.create_component(new)).await
}

/// GET /components/:id
pub async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<Component> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.get_component(id)).await
}

/// GET /components/sku/:sku
pub async fn get_component_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> HttpResult<Component> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.get_component_by_sku(&sku)).await
}

/// PUT /components/:id
pub async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ComponentPatch>,
) -> HttpResult<Component> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.update_component(id, patch)).await
}

/// DELETE /components/:id
pub async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.delete_component(id)).await?;
    Ok(MessageResponse::deleted("Component"))
}

// ==========================================
// 库存变动 (只读 + 新建)
// ==========================================

/// GET /stock-movements/
pub async fn list_stock_movements(
    State(state): State<AppState>,
    Query(query): Query<StockMovementListQuery>,
) -> HttpResult<Vec<StockMovement>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = StockMovementFilter {
        component_id: query.component_id,
        movement_type: query.movement_type,
    };
    let api = state.inventory_api.clone();
    run_blocking(move || api.list_stock_movements(&filter, page)).await
}

/// POST /stock-movements/
pub async fn create_stock_movement(
    State(state): State<AppState>,
    Json(new): Json<NewStockMovement>,
) -> HttpResult<StockMovement> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.create_stock_movement(new)).await
}

/// GET /stock-movements/:id
pub async fn get_stock_movement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<StockMovement> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.get_stock_movement(id)).await
}
