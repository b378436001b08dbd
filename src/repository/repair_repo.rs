// ==========================================
// Pentwheel 跟踪服务 - 维修单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::repair::{Repair, RepairFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_decimal, get_enum, get_uuid, hundredths};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_REPAIR: &str = r#"
    SELECT id, repair_id, customer_name, device_model, issue_description,
           status, priority, start_date, estimated_completion, actual_completion,
           assigned_technician, labor_cost, parts_cost, notes, created_at, updated_at
    FROM repairs
"#;

// ==========================================
// RepairRepository - 维修单仓储
// ==========================================
pub struct RepairRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RepairRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Repair> {
        Ok(Repair {
            id: get_uuid(row, 0)?,
            repair_id: row.get(1)?,
            customer_name: row.get(2)?,
            device_model: row.get(3)?,
            issue_description: row.get(4)?,
            status: get_enum(row, 5)?,
            priority: get_enum(row, 6)?,
            start_date: row.get(7)?,
            estimated_completion: row.get(8)?,
            actual_completion: row.get(9)?,
            assigned_technician: row.get(10)?,
            labor_cost: get_decimal(row, 11)?,
            parts_cost: get_decimal(row, 12)?,
            notes: row.get(13)?,
            created_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }

    pub fn insert(&self, repair: &Repair) -> RepositoryResult<()> {
        let labor_cost = hundredths("labor_cost", repair.labor_cost)?;
        let parts_cost = hundredths("parts_cost", repair.parts_cost)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO repairs (
                id, repair_id, customer_name, device_model, issue_description,
                status, priority, start_date, estimated_completion, actual_completion,
                assigned_technician, labor_cost, parts_cost, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                repair.id.to_string(),
                repair.repair_id,
                repair.customer_name,
                repair.device_model,
                repair.issue_description,
                repair.status.as_str(),
                repair.priority.as_str(),
                repair.start_date,
                repair.estimated_completion,
                repair.actual_completion,
                repair.assigned_technician,
                labor_cost,
                parts_cost,
                repair.notes,
                repair.created_at,
                repair.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Repair>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_REPAIR);
        let repair = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(repair)
    }

    pub fn exists(&self, id: Uuid) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM repairs WHERE id = ?1",
                params![id.to_string()],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn list(&self, filter: &RepairFilter, page: Page) -> RepositoryResult<Vec<Repair>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_REPAIR)
            .filter_eq(
                "status",
                filter.status.map(|s| Value::Text(s.as_str().to_string())),
            )
            .filter_eq(
                "priority",
                filter.priority.map(|p| Value::Text(p.as_str().to_string())),
            )
            .order_by("created_at DESC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let repairs = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(repairs)
    }

    /// 覆盖写入全部可更新列
    pub fn update(&self, repair: &Repair) -> RepositoryResult<()> {
        let labor_cost = hundredths("labor_cost", repair.labor_cost)?;
        let parts_cost = hundredths("parts_cost", repair.parts_cost)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE repairs SET
                repair_id = ?2, customer_name = ?3, device_model = ?4,
                issue_description = ?5, status = ?6, priority = ?7, start_date = ?8,
                estimated_completion = ?9, actual_completion = ?10,
                assigned_technician = ?11, labor_cost = ?12, parts_cost = ?13,
                notes = ?14, updated_at = ?15
            WHERE id = ?1
            "#,
            params![
                repair.id.to_string(),
                repair.repair_id,
                repair.customer_name,
                repair.device_model,
                repair.issue_description,
                repair.status.as_str(),
                repair.priority.as_str(),
                repair.start_date,
                repair.estimated_completion,
                repair.actual_completion,
                repair.assigned_technician,
                labor_cost,
                parts_cost,
                repair.notes,
                repair.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Repair", repair.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM repairs WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Repair", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repair::NewRepair;
    use crate::domain::types::{RepairPriority, StatusType};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn make_repair(repair_id: &str, status: StatusType, priority: RepairPriority) -> Repair {
        Repair::from_new(
            NewRepair {
                repair_id: repair_id.to_string(),
                customer_name: Some("Acme".to_string()),
                device_model: None,
                issue_description: "Cracked housing".to_string(),
                status,
                priority,
                start_date: None,
                estimated_completion: None,
                actual_completion: None,
                assigned_technician: None,
                labor_cost: Decimal::new(1050, 2),
                parts_cost: Decimal::new(499, 2),
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_round_trip_keeps_decimal_costs() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let repo = RepairRepository::new(conn);

        let repair = make_repair("REP-001", StatusType::Pending, RepairPriority::High);
        repo.insert(&repair).unwrap();

        let found = repo.find_by_id(repair.id).unwrap().unwrap();
        assert_eq!(found.labor_cost, Decimal::new(1050, 2));
        assert_eq!(found.total_cost(), Decimal::new(1549, 2));
        assert_eq!(found.priority, RepairPriority::High);
    }

    #[test]
    fn test_list_filters_by_status_and_priority() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let repo = RepairRepository::new(conn);

        repo.insert(&make_repair("R1", StatusType::Pending, RepairPriority::High))
            .unwrap();
        repo.insert(&make_repair("R2", StatusType::Pending, RepairPriority::Low))
            .unwrap();
        repo.insert(&make_repair("R3", StatusType::Completed, RepairPriority::High))
            .unwrap();

        let filter = RepairFilter {
            status: Some(StatusType::Pending),
            priority: Some(RepairPriority::High),
        };
        let found = repo.list(&filter, Page::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].repair_id, "R1");

        let all = repo.list(&RepairFilter::default(), Page::default()).unwrap();
        assert_eq!(all.len(), 3);
    }
}
