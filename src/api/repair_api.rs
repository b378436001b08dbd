// ==========================================
// Pentwheel 跟踪服务 - 维修 API
// ==========================================
// 职责:
// 1. 维修单 CRUD (响应附带 total_cost)
// 2. 维修用料 CRUD (响应附带 total_cost)
// 约束: 用料的 repair_id / component_id 必须存在 (否则 404)
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::Validate;
use crate::domain::repair::{
    NewRepair, NewRepairComponent, Repair, RepairComponent, RepairComponentFilter,
    RepairComponentPatch, RepairComponentView, RepairFilter, RepairPatch, RepairView,
};
use crate::repository::component_repo::ComponentRepository;
use crate::repository::repair_component_repo::RepairComponentRepository;
use crate::repository::repair_repo::RepairRepository;
use crate::repository::sql_builder::Page;

// ==========================================
// RepairApi
// ==========================================
pub struct RepairApi {
    repair_repo: Arc<RepairRepository>,
    link_repo: Arc<RepairComponentRepository>,
    component_repo: Arc<ComponentRepository>,
}

impl RepairApi {
    pub fn new(
        repair_repo: Arc<RepairRepository>,
        link_repo: Arc<RepairComponentRepository>,
        component_repo: Arc<ComponentRepository>,
    ) -> Self {
        Self {
            repair_repo,
            link_repo,
            component_repo,
        }
    }

    // ==========================================
    // 维修单
    // ==========================================

    pub fn create_repair(&self, new: NewRepair) -> ApiResult<RepairView> {
        let repair = Repair::from_new(new, Utc::now());
        repair.validate()?;
        self.repair_repo.insert(&repair)?;

        tracing::info!(id = %repair.id, repair_id = %repair.repair_id, "维修单已创建");
        self.get_repair(repair.id)
    }

    pub fn get_repair(&self, id: Uuid) -> ApiResult<RepairView> {
        self.find_repair(id).map(RepairView::from)
    }

    pub fn list_repairs(&self, filter: &RepairFilter, page: Page) -> ApiResult<Vec<RepairView>> {
        let repairs = self.repair_repo.list(filter, page)?;
        Ok(repairs.into_iter().map(RepairView::from).collect())
    }

    pub fn update_repair(&self, id: Uuid, patch: RepairPatch) -> ApiResult<RepairView> {
        let mut repair = self.find_repair(id)?;
        repair.apply_patch(patch);
        repair.updated_at = Utc::now();
        repair.validate()?;

        self.repair_repo.update(&repair)?;
        self.get_repair(id)
    }

    pub fn delete_repair(&self, id: Uuid) -> ApiResult<()> {
        self.repair_repo.delete(id)?;
        tracing::info!(id = %id, "维修单已删除");
        Ok(())
    }

    fn find_repair(&self, id: Uuid) -> ApiResult<Repair> {
        self.repair_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Repair"))
    }

    // ==========================================
    // 维修用料
    // ==========================================

    pub fn create_repair_component(
        &self,
        new: NewRepairComponent,
    ) -> ApiResult<RepairComponentView> {
        let link = RepairComponent::from_new(new, Utc::now());
        link.validate()?;
        self.ensure_parents(&link)?;
        self.link_repo.insert(&link)?;

        tracing::info!(
            id = %link.id,
            repair_id = %link.repair_id,
            component_id = %link.component_id,
            "维修用料已登记"
        );
        self.get_repair_component(link.id)
    }

    pub fn get_repair_component(&self, id: Uuid) -> ApiResult<RepairComponentView> {
        self.find_link(id).map(RepairComponentView::from)
    }

    pub fn list_repair_components(
        &self,
        filter: &RepairComponentFilter,
        page: Page,
    ) -> ApiResult<Vec<RepairComponentView>> {
        let links = self.link_repo.list(filter, page)?;
        Ok(links.into_iter().map(RepairComponentView::from).collect())
    }

    pub fn update_repair_component(
        &self,
        id: Uuid,
        patch: RepairComponentPatch,
    ) -> ApiResult<RepairComponentView> {
        let mut link = self.find_link(id)?;
        let repointed = patch.repair_id.is_some() || patch.component_id.is_some();
        link.apply_patch(patch);
        link.validate()?;
        if repointed {
            self.ensure_parents(&link)?;
        }

        self.link_repo.update(&link)?;
        self.get_repair_component(id)
    }

    pub fn delete_repair_component(&self, id: Uuid) -> ApiResult<()> {
        self.link_repo.delete(id)?;
        Ok(())
    }

    fn find_link(&self, id: Uuid) -> ApiResult<RepairComponent> {
        self.link_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Repair component"))
    }

    fn ensure_parents(&self, link: &RepairComponent) -> ApiResult<()> {
        if !self.repair_repo.exists(link.repair_id)? {
            return Err(ApiError::not_found("Repair"));
        }
        if !self.component_repo.exists(link.component_id)? {
            return Err(ApiError::not_found("Component"));
        }
        Ok(())
    }
}
