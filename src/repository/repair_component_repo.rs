// ==========================================
// Pentwheel 跟踪服务 - 维修用料数据仓储
// ==========================================

use crate::domain::repair::{RepairComponent, RepairComponentFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_decimal, get_uuid, hundredths};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_LINK: &str = r#"
    SELECT id, repair_id, component_id, quantity_needed, quantity_used,
           cost_per_unit, notes, created_at
    FROM repair_components
"#;

// ==========================================
// RepairComponentRepository - 维修用料仓储
// ==========================================
pub struct RepairComponentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RepairComponentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<RepairComponent> {
        Ok(RepairComponent {
            id: get_uuid(row, 0)?,
            repair_id: get_uuid(row, 1)?,
            component_id: get_uuid(row, 2)?,
            quantity_needed: row.get(3)?,
            quantity_used: row.get(4)?,
            cost_per_unit: get_decimal(row, 5)?,
            notes: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    pub fn insert(&self, link: &RepairComponent) -> RepositoryResult<()> {
        let cost_per_unit = hundredths("cost_per_unit", link.cost_per_unit)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO repair_components (
                id, repair_id, component_id, quantity_needed, quantity_used,
                cost_per_unit, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                link.id.to_string(),
                link.repair_id.to_string(),
                link.component_id.to_string(),
                link.quantity_needed,
                link.quantity_used,
                cost_per_unit,
                link.notes,
                link.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<RepairComponent>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_LINK);
        let link = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(link)
    }

    pub fn list(
        &self,
        filter: &RepairComponentFilter,
        page: Page,
    ) -> RepositoryResult<Vec<RepairComponent>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_LINK)
            .filter_eq(
                "repair_id",
                filter.repair_id.map(|id| Value::Text(id.to_string())),
            )
            .order_by("created_at ASC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let links = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(links)
    }

    pub fn update(&self, link: &RepairComponent) -> RepositoryResult<()> {
        let cost_per_unit = hundredths("cost_per_unit", link.cost_per_unit)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE repair_components SET
                repair_id = ?2, component_id = ?3, quantity_needed = ?4,
                quantity_used = ?5, cost_per_unit = ?6, notes = ?7
            WHERE id = ?1
            "#,
            params![
                link.id.to_string(),
                link.repair_id.to_string(),
                link.component_id.to_string(),
                link.quantity_needed,
                link.quantity_used,
                cost_per_unit,
                link.notes,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Repair component", link.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM repair_components WHERE id = ?1",
            params![id.to_string()],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Repair component", id));
        }
        Ok(())
    }
}
