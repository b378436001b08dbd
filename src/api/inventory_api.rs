// ==========================================
// Pentwheel 跟踪服务 - 库存 API
// ==========================================
// 职责:
// 1. 零部件 CRUD + 按 SKU 查询
// 2. 库存变动 (只追加), 写入时同步调整 current_stock
// 约束: 库存不得为负 (违反 -> 409, 不写入)
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::Validate;
use crate::domain::component::{
    Component, ComponentFilter, ComponentPatch, NewComponent, NewStockMovement, StockMovement,
    StockMovementFilter,
};
use crate::repository::component_repo::ComponentRepository;
use crate::repository::error::RepositoryError;
use crate::repository::sql_builder::Page;
use crate::repository::stock_movement_repo::StockMovementRepository;

// ==========================================
// InventoryApi
// ==========================================
pub struct InventoryApi {
    component_repo: Arc<ComponentRepository>,
    movement_repo: Arc<StockMovementRepository>,
}

impl InventoryApi {
    pub fn new(
        component_repo: Arc<ComponentRepository>,
        movement_repo: Arc<StockMovementRepository>,
    ) -> Self {
        Self {
            component_repo,
            movement_repo,
        }
    }

    // ==========================================
    // 零部件
    // ==========================================

    pub fn create_component(&self, new: NewComponent) -> ApiResult<Component> {
        let component = Component::from_new(new, Utc::now());
        component.validate()?;
        self.component_repo.insert(&component)?;

        tracing::info!(id = %component.id, sku = %component.sku, "零部件已创建");
        self.get_component(component.id)
    }

    pub fn get_component(&self, id: Uuid) -> ApiResult<Component> {
        self.component_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Component"))
    }

    pub fn get_component_by_sku(&self, sku: &str) -> ApiResult<Component> {
        self.component_repo
            .find_by_sku(sku)?
            .ok_or_else(|| ApiError::not_found("Component"))
    }

    pub fn list_components(
        &self,
        filter: &ComponentFilter,
        page: Page,
    ) -> ApiResult<Vec<Component>> {
        Ok(self.component_repo.list(filter, page)?)
    }

    pub fn update_component(&self, id: Uuid, patch: ComponentPatch) -> ApiResult<Component> {
        let mut component = self.get_component(id)?;
        component.apply_patch(patch);
        component.updated_at = Utc::now();
        component.validate()?;

        self.component_repo.update(&component)?;
        self.get_component(id)
    }

    pub fn delete_component(&self, id: Uuid) -> ApiResult<()> {
        self.component_repo.delete(id)?;
        tracing::info!(id = %id, "零部件已删除");
        Ok(())
    }

    // ==========================================
    // 库存变动
    // ==========================================

    /// 登记库存变动
    ///
    /// - in: +|quantity|
    /// - out: -|quantity| (以负数存储)
    /// - adjustment: 按原符号
    pub fn create_stock_movement(&self, new: NewStockMovement) -> ApiResult<StockMovement> {
        new.validate()?;
        let movement = StockMovement::from_new(new, Utc::now());

        let current_stock = self
            .movement_repo
            .create_with_stock_adjustment(&movement)
            .map_err(|e| match e {
                RepositoryError::CheckConstraintViolation(_) => {
                    ApiError::BusinessRuleViolation(format!(
                        "Insufficient stock: movement of {} would make current_stock negative",
                        movement.quantity
                    ))
                }
                other => other.into(),
            })?;

        tracing::info!(
            id = %movement.id,
            component_id = %movement.component_id,
            movement_type = %movement.movement_type,
            quantity = movement.quantity,
            current_stock,
            "库存变动已登记"
        );
        self.get_stock_movement(movement.id)
    }

    pub fn get_stock_movement(&self, id: Uuid) -> ApiResult<StockMovement> {
        self.movement_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Stock movement"))
    }

    pub fn list_stock_movements(
        &self,
        filter: &StockMovementFilter,
        page: Page,
    ) -> ApiResult<Vec<StockMovement>> {
        Ok(self.movement_repo.list(filter, page)?)
    }
}
