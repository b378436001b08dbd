// ==========================================
// Pentwheel 跟踪服务 - 退货 API
// ==========================================
// 职责: 退货单 CRUD
// 约束: company_id 必须指向已存在的公司 (否则 404)
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::Validate;
use crate::domain::returns::{NewReturn, Return, ReturnFilter, ReturnPatch};
use crate::repository::company_repo::CompanyRepository;
use crate::repository::return_repo::ReturnRepository;
use crate::repository::sql_builder::Page;

// ==========================================
// ReturnApi
// ==========================================
pub struct ReturnApi {
    return_repo: Arc<ReturnRepository>,
    company_repo: Arc<CompanyRepository>,
}

impl ReturnApi {
    pub fn new(return_repo: Arc<ReturnRepository>, company_repo: Arc<CompanyRepository>) -> Self {
        Self {
            return_repo,
            company_repo,
        }
    }

    pub fn create_return(&self, new: NewReturn) -> ApiResult<Return> {
        let ret = Return::from_new(new, Utc::now());
        ret.validate()?;
        self.ensure_company(ret.company_id)?;
        self.return_repo.insert(&ret)?;

        tracing::info!(id = %ret.id, return_id = %ret.return_id, "退货单已创建");
        self.get_return(ret.id)
    }

    pub fn get_return(&self, id: Uuid) -> ApiResult<Return> {
        self.return_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::not_found("Return"))
    }

    pub fn list_returns(&self, filter: &ReturnFilter, page: Page) -> ApiResult<Vec<Return>> {
        Ok(self.return_repo.list(filter, page)?)
    }

    pub fn update_return(&self, id: Uuid, patch: ReturnPatch) -> ApiResult<Return> {
        let mut ret = self.get_return(id)?;
        let company_changed = matches!(patch.company_id, Some(Some(_)));
        ret.apply_patch(patch);
        ret.updated_at = Utc::now();
        ret.validate()?;
        if company_changed {
            self.ensure_company(ret.company_id)?;
        }

        self.return_repo.update(&ret)?;
        self.get_return(id)
    }

    pub fn delete_return(&self, id: Uuid) -> ApiResult<()> {
        self.return_repo.delete(id)?;
        tracing::info!(id = %id, "退货单已删除");
        Ok(())
    }

    fn ensure_company(&self, company_id: Option<Uuid>) -> ApiResult<()> {
        match company_id {
            Some(id) if !self.company_repo.exists(id)? => Err(ApiError::not_found("Company")),
            _ => Ok(()),
        }
    }
}
