// ==========================================
// Pentwheel 跟踪服务 - 周预算 API
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::Validate;
use crate::domain::budget::{BudgetEntry, BudgetEntryFilter, BudgetEntryPatch, NewBudgetEntry};
use crate::repository::budget_repo::BudgetRepository;
use crate::repository::sql_builder::Page;

// ==========================================
// BudgetApi
// ==========================================
pub struct BudgetApi {
    budget_repo: Arc<BudgetRepository>,
}

impl BudgetApi {
    pub fn new(budget_repo: Arc<BudgetRepository>) -> Self {
        Self { budget_repo }
    }

    pub fn create_budget_entry(&self, new: NewBudgetEntry) -> ApiResult<BudgetEntry> {
        let entry = BudgetEntry::from_new(new, Utc::now());
        entry.validate()?;
        self.budget_repo.insert(&entry)?;

        tracing::info!(
            id = %entry.id,
            week_start = %entry.week_start,
            category = %entry.category,
            "预算条目已创建"
        );
        self.get_budget_entry(entry.id)
    }

    pub fn get_budget_entry(&self, id: Uuid) -> ApiResult<BudgetEntry> {
        self.budget_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Budget entry"))
    }

    /// 按 week_start 倒序
    pub fn list_budget_entries(
        &self,
        filter: &BudgetEntryFilter,
        page: Page,
    ) -> ApiResult<Vec<BudgetEntry>> {
        Ok(self.budget_repo.list(filter, page)?)
    }

    /// 校验合并后的记录 (week_start <= week_end)
    pub fn update_budget_entry(&self, id: Uuid, patch: BudgetEntryPatch) -> ApiResult<BudgetEntry> {
        let mut entry = self.get_budget_entry(id)?;
        entry.apply_patch(patch);
        entry.updated_at = Utc::now();
        entry.validate()?;

        self.budget_repo.update(&entry)?;
        self.get_budget_entry(id)
    }

    pub fn delete_budget_entry(&self, id: Uuid) -> ApiResult<()> {
        self.budget_repo.delete(id)?;
        tracing::info!(id = %id, "预算条目已删除");
        Ok(())
    }
}
