// ==========================================
// Pentwheel 跟踪服务 - 零部件数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::component::{Component, ComponentFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_decimal, get_uuid, hundredths};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_COMPONENT: &str = r#"
    SELECT id, name, sku, description, category, unit_cost, supplier,
           minimum_stock, current_stock, reorder_level, created_at, updated_at
    FROM components
"#;

/// 低库存判定 (含等于)
pub const LOW_STOCK_CONDITION: &str = "current_stock <= reorder_level";

// ==========================================
// ComponentRepository - 零部件仓储
// ==========================================
pub struct ComponentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ComponentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Component> {
        Ok(Component {
            id: get_uuid(row, 0)?,
            name: row.get(1)?,
            sku: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            unit_cost: get_decimal(row, 5)?,
            supplier: row.get(6)?,
            minimum_stock: row.get(7)?,
            current_stock: row.get(8)?,
            reorder_level: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    pub fn insert(&self, component: &Component) -> RepositoryResult<()> {
        let unit_cost = hundredths("unit_cost", component.unit_cost)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO components (
                id, name, sku, description, category, unit_cost, supplier,
                minimum_stock, current_stock, reorder_level, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                component.id.to_string(),
                component.name,
                component.sku,
                component.description,
                component.category,
                unit_cost,
                component.supplier,
                component.minimum_stock,
                component.current_stock,
                component.reorder_level,
                component.created_at,
                component.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Component>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COMPONENT);
        let component = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(component)
    }

    pub fn find_by_sku(&self, sku: &str) -> RepositoryResult<Option<Component>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE sku = ?1", SELECT_COMPONENT);
        let component = conn
            .query_row(&sql, params![sku], Self::map_row)
            .optional()?;
        Ok(component)
    }

    pub fn exists(&self, id: Uuid) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM components WHERE id = ?1",
                params![id.to_string()],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn list(&self, filter: &ComponentFilter, page: Page) -> RepositoryResult<Vec<Component>> {
        let conn = self.get_conn()?;
        let mut builder = SqlQueryBuilder::new(SELECT_COMPONENT).filter_eq(
            "category",
            filter.category.clone().map(Value::Text),
        );
        if filter.low_stock {
            builder = builder.where_clause(LOW_STOCK_CONDITION);
        }
        let (sql, values) = builder.order_by("name ASC, id ASC").page(page).build();

        let mut stmt = conn.prepare(&sql)?;
        let components = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(components)
    }

    /// 覆盖写入全部可更新列
    pub fn update(&self, component: &Component) -> RepositoryResult<()> {
        let unit_cost = hundredths("unit_cost", component.unit_cost)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE components SET
                name = ?2, sku = ?3, description = ?4, category = ?5, unit_cost = ?6,
                supplier = ?7, minimum_stock = ?8, current_stock = ?9,
                reorder_level = ?10, updated_at = ?11
            WHERE id = ?1
            "#,
            params![
                component.id.to_string(),
                component.name,
                component.sku,
                component.description,
                component.category,
                unit_cost,
                component.supplier,
                component.minimum_stock,
                component.current_stock,
                component.reorder_level,
                component.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Component", component.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected =
            conn.execute("DELETE FROM components WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Component", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::NewComponent;
    use chrono::Utc;

    fn make_component(sku: &str, category: &str, current: i64, reorder: i64) -> Component {
        Component::from_new(
            NewComponent {
                name: format!("Part {}", sku),
                sku: sku.to_string(),
                category: Some(category.to_string()),
                current_stock: current,
                reorder_level: reorder,
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn setup() -> ComponentRepository {
        let conn = crate::db::open_in_memory().unwrap();
        ComponentRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_find_by_sku() {
        let repo = setup();
        let component = make_component("SKU-1", "Sensors", 10, 2);
        repo.insert(&component).unwrap();

        assert_eq!(repo.find_by_sku("SKU-1").unwrap().unwrap().id, component.id);
        assert!(repo.find_by_sku("SKU-404").unwrap().is_none());
    }

    #[test]
    fn test_low_stock_filter_is_inclusive() {
        let repo = setup();
        repo.insert(&make_component("A", "Sensors", 5, 5)).unwrap();
        repo.insert(&make_component("B", "Sensors", 6, 5)).unwrap();
        repo.insert(&make_component("C", "Cables", 0, 3)).unwrap();

        let filter = ComponentFilter {
            category: None,
            low_stock: true,
        };
        let low = repo.list(&filter, Page::default()).unwrap();
        let skus: Vec<&str> = low.iter().map(|c| c.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "C"]);

        let filter = ComponentFilter {
            category: Some("Sensors".to_string()),
            low_stock: true,
        };
        assert_eq!(repo.list(&filter, Page::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_negative_stock_rejected_by_schema() {
        let repo = setup();
        let mut component = make_component("NEG", "Sensors", 1, 0);
        repo.insert(&component).unwrap();

        component.current_stock = -1;
        let err = repo.update(&component).unwrap_err();
        assert!(matches!(err, RepositoryError::CheckConstraintViolation(_)));
    }
}
