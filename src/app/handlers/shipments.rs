// ==========================================
// 发运接口
// ==========================================

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::common::{run_blocking, HttpResult, MessageResponse, Pagination};
use crate::app::state::AppState;
use crate::domain::shipment::{NewShipment, Shipment, ShipmentFilter, ShipmentPatch};
use crate::domain::types::{ShipmentType, StatusType};

#[derive(Debug, Deserialize)]
pub struct ShipmentListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "type")]
    pub shipment_type: Option<ShipmentType>,
    pub status: Option<StatusType>,
}

/// GET /shipments/
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(query): Query<ShipmentListQuery>,
) -> HttpResult<Vec<Shipment>> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    }
    .page(&state);
    let filter = ShipmentFilter {
        shipment_type: query.shipment_type,
        status: query.status,
    };
    let api = state.shipment_api.clone();
    run_blocking(move || api.list_shipments(&filter, page)).await
}

/// POST /shipments/
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(new): Json<NewShipment>,
) -> HttpResult<Shipment> {
    let api = state.shipment_api.clone();
    run_blocking(move || api.create_shipment(new)).await
}

/// GET /shipments/:id
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<Shipment> {
    let api = state.shipment_api.clone();
    run_blocking(move || api.get_shipment(id)).await
}

/// PUT /shipments/:id
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ShipmentPatch>,
) -> HttpResult<Shipment> {
    let api = state.shipment_api.clone();
    run_blocking(move || api.update_shipment(id, patch)).await
}

/// DELETE /shipments/:id
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HttpResult<MessageResponse> {
    let api = state.shipment_api.clone();
    run_blocking(move || api.delete_shipment(id)).await?;
    Ok(MessageResponse::deleted("Shipment"))
}
