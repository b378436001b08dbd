// ==========================================
// Pentwheel 跟踪服务 - 公司 API
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::Validate;
use crate::domain::company::{Company, CompanyPatch, NewCompany};
use crate::repository::company_repo::CompanyRepository;
use crate::repository::sql_builder::Page;

// ==========================================
// CompanyApi
// ==========================================
pub struct CompanyApi {
    company_repo: Arc<CompanyRepository>,
}

impl CompanyApi {
    pub fn new(company_repo: Arc<CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub fn create_company(&self, new: NewCompany) -> ApiResult<Company> {
        let company = Company::from_new(new, Utc::now());
        company.validate()?;
        self.company_repo.insert(&company)?;

        tracing::info!(company_id = %company.id, name = %company.name, "公司已创建");
        self.get_company(company.id)
    }

    pub fn get_company(&self, id: Uuid) -> ApiResult<Company> {
        self.company_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Company"))
    }

    pub fn list_companies(&self, page: Page) -> ApiResult<Vec<Company>> {
        Ok(self.company_repo.list(page)?)
    }

    pub fn update_company(&self, id: Uuid, patch: CompanyPatch) -> ApiResult<Company> {
        let mut company = self.get_company(id)?;
        company.apply_patch(patch);
        company.updated_at = Utc::now();
        company.validate()?;

        self.company_repo.update(&company)?;
        self.get_company(id)
    }

    pub fn delete_company(&self, id: Uuid) -> ApiResult<()> {
        self.company_repo.delete(id)?;
        tracing::info!(company_id = %id, "公司已删除");
        Ok(())
    }
}
