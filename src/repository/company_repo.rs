// ==========================================
// Pentwheel 跟踪服务 - 公司数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::company::Company;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::get_uuid;
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_COMPANY: &str = r#"
    SELECT id, name, email, phone, address, contact_person, created_at, updated_at
    FROM companies
"#;

// ==========================================
// CompanyRepository - 公司仓储
// ==========================================
pub struct CompanyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CompanyRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Company> {
        Ok(Company {
            id: get_uuid(row, 0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            address: row.get(4)?,
            contact_person: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    pub fn insert(&self, company: &Company) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO companies (
                id, name, email, phone, address, contact_person, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                company.id.to_string(),
                company.name,
                company.email,
                company.phone,
                company.address,
                company.contact_person,
                company.created_at,
                company.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COMPANY);
        let company = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(company)
    }

    pub fn exists(&self, id: Uuid) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM companies WHERE id = ?1",
                params![id.to_string()],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn list(&self, page: Page) -> RepositoryResult<Vec<Company>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_COMPANY)
            .order_by("created_at ASC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let companies = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(companies)
    }

    /// 覆盖写入全部可更新列
    pub fn update(&self, company: &Company) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE companies SET
                name = ?2, email = ?3, phone = ?4, address = ?5, contact_person = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
            params![
                company.id.to_string(),
                company.name,
                company.email,
                company.phone,
                company.address,
                company.contact_person,
                company.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Company", company.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM companies WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Company", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::NewCompany;
    use chrono::Utc;

    fn setup() -> CompanyRepository {
        let conn = crate::db::open_in_memory().unwrap();
        CompanyRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_find_update_delete() {
        let repo = setup();
        let mut company = Company::from_new(
            NewCompany {
                name: "Global Logistics".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );
        repo.insert(&company).unwrap();

        let found = repo.find_by_id(company.id).unwrap().unwrap();
        assert_eq!(found.name, "Global Logistics");
        assert!(repo.exists(company.id).unwrap());

        company.email = Some("ops@global.test".to_string());
        repo.update(&company).unwrap();
        let found = repo.find_by_id(company.id).unwrap().unwrap();
        assert_eq!(found.email.as_deref(), Some("ops@global.test"));

        repo.delete(company.id).unwrap();
        assert!(repo.find_by_id(company.id).unwrap().is_none());
        assert!(matches!(
            repo.delete(company.id),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_pagination() {
        let repo = setup();
        for i in 0..5 {
            let company = Company::from_new(
                NewCompany {
                    name: format!("Company {}", i),
                    ..Default::default()
                },
                Utc::now(),
            );
            repo.insert(&company).unwrap();
        }

        assert_eq!(repo.list(Page::default()).unwrap().len(), 5);
        assert_eq!(repo.list(Page::new(3, 10)).unwrap().len(), 2);
        assert_eq!(repo.list(Page::new(0, 2)).unwrap().len(), 2);
    }
}
