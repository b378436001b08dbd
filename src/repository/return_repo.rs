// ==========================================
// Pentwheel 跟踪服务 - 退货数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::returns::{Return, ReturnFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_decimal, get_enum, get_opt_uuid, get_uuid, hundredths};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_RETURN: &str = r#"
    SELECT id, return_id, company_id, status, return_date, reason,
           total_items, total_value, notes, created_at, updated_at
    FROM returns
"#;

// ==========================================
// ReturnRepository - 退货仓储
// ==========================================
pub struct ReturnRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReturnRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Return> {
        Ok(Return {
            id: get_uuid(row, 0)?,
            return_id: row.get(1)?,
            company_id: get_opt_uuid(row, 2)?,
            status: get_enum(row, 3)?,
            return_date: row.get(4)?,
            reason: row.get(5)?,
            total_items: row.get(6)?,
            total_value: get_decimal(row, 7)?,
            notes: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    pub fn insert(&self, ret: &Return) -> RepositoryResult<()> {
        let total_value = hundredths("total_value", ret.total_value)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO returns (
                id, return_id, company_id, status, return_date, reason,
                total_items, total_value, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                ret.id.to_string(),
                ret.return_id,
                ret.company_id.map(|id| id.to_string()),
                ret.status.as_str(),
                ret.return_date,
                ret.reason,
                ret.total_items,
                total_value,
                ret.notes,
                ret.created_at,
                ret.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Return>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_RETURN);
        let ret = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(ret)
    }

    pub fn list(&self, filter: &ReturnFilter, page: Page) -> RepositoryResult<Vec<Return>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_RETURN)
            .filter_eq(
                "status",
                filter.status.map(|s| Value::Text(s.as_str().to_string())),
            )
            .order_by("return_date DESC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let returns = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(returns)
    }

    /// 覆盖写入全部可更新列
    pub fn update(&self, ret: &Return) -> RepositoryResult<()> {
        let total_value = hundredths("total_value", ret.total_value)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE returns SET
                return_id = ?2, company_id = ?3, status = ?4, return_date = ?5,
                reason = ?6, total_items = ?7, total_value = ?8, notes = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
            params![
                ret.id.to_string(),
                ret.return_id,
                ret.company_id.map(|id| id.to_string()),
                ret.status.as_str(),
                ret.return_date,
                ret.reason,
                ret.total_items,
                total_value,
                ret.notes,
                ret.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Return", ret.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM returns WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Return", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::returns::NewReturn;
    use crate::domain::types::StatusType;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn make_return(return_id: &str, status: StatusType) -> Return {
        Return::from_new(
            NewReturn {
                return_id: return_id.to_string(),
                company_id: None,
                status,
                return_date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
                reason: None,
                total_items: 5,
                total_value: Decimal::new(125050, 2),
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_round_trip_and_status_filter() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let repo = ReturnRepository::new(conn);

        let first = make_return("RET-2025-001", StatusType::InProgress);
        repo.insert(&first).unwrap();
        repo.insert(&make_return("RET-2025-002", StatusType::Completed))
            .unwrap();

        let found = repo.find_by_id(first.id).unwrap().unwrap();
        assert_eq!(found.total_value, Decimal::new(125050, 2));
        assert_eq!(found.status, StatusType::InProgress);

        let filter = ReturnFilter {
            status: Some(StatusType::Completed),
        };
        let completed = repo.list(&filter, Page::default()).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].return_id, "RET-2025-002");
    }

    #[test]
    fn test_duplicate_return_id_is_unique_violation() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let repo = ReturnRepository::new(conn);

        repo.insert(&make_return("RET-1", StatusType::Pending)).unwrap();
        let err = repo
            .insert(&make_return("RET-1", StatusType::Pending))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }
}
