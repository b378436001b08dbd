// ==========================================
// Pentwheel 跟踪服务 - 发运 API
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::Validate;
use crate::domain::shipment::{NewShipment, Shipment, ShipmentFilter, ShipmentPatch};
use crate::repository::shipment_repo::ShipmentRepository;
use crate::repository::sql_builder::Page;

// ==========================================
// ShipmentApi
// ==========================================
pub struct ShipmentApi {
    shipment_repo: Arc<ShipmentRepository>,
}

impl ShipmentApi {
    pub fn new(shipment_repo: Arc<ShipmentRepository>) -> Self {
        Self { shipment_repo }
    }

    pub fn create_shipment(&self, new: NewShipment) -> ApiResult<Shipment> {
        let shipment = Shipment::from_new(new, Utc::now());
        shipment.validate()?;
        self.shipment_repo.insert(&shipment)?;

        tracing::info!(
            id = %shipment.id,
            shipment_id = %shipment.shipment_id,
            shipment_type = %shipment.shipment_type,
            "发运单已创建"
        );
        self.get_shipment(shipment.id)
    }

    pub fn get_shipment(&self, id: Uuid) -> ApiResult<Shipment> {
        self.shipment_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Shipment"))
    }

    pub fn list_shipments(&self, filter: &ShipmentFilter, page: Page) -> ApiResult<Vec<Shipment>> {
        Ok(self.shipment_repo.list(filter, page)?)
    }

    pub fn update_shipment(&self, id: Uuid, patch: ShipmentPatch) -> ApiResult<Shipment> {
        let mut shipment = self.get_shipment(id)?;
        shipment.apply_patch(patch);
        shipment.updated_at = Utc::now();
        shipment.validate()?;

        self.shipment_repo.update(&shipment)?;
        self.get_shipment(id)
    }

    pub fn delete_shipment(&self, id: Uuid) -> ApiResult<()> {
        self.shipment_repo.delete(id)?;
        tracing::info!(id = %id, "发运单已删除");
        Ok(())
    }
}
