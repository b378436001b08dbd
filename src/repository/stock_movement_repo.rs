// ==========================================
// Pentwheel 跟踪服务 - 库存变动数据仓储
// ==========================================
// 只追加: 无 update / delete
// 写入变动与调整 current_stock 在同一事务内完成
// ==========================================

use crate::domain::component::{StockMovement, StockMovementFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_enum, get_opt_uuid, get_uuid};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_MOVEMENT: &str = r#"
    SELECT id, component_id, movement_type, quantity, reference_id,
           reference_type, notes, created_at
    FROM stock_movements
"#;

// ==========================================
// StockMovementRepository - 库存变动仓储
// ==========================================
pub struct StockMovementRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StockMovementRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<StockMovement> {
        Ok(StockMovement {
            id: get_uuid(row, 0)?,
            component_id: get_uuid(row, 1)?,
            movement_type: get_enum(row, 2)?,
            quantity: row.get(3)?,
            reference_id: get_opt_uuid(row, 4)?,
            reference_type: row.get(5)?,
            notes: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    /// 写入库存变动并同步调整零部件库存
    ///
    /// `movement.quantity` 已是带符号的库存影响量
    /// 零部件不存在 -> NotFound; 库存将变为负数 -> CheckConstraintViolation;
    /// 库存超出 i64 范围 -> StockOutOfRange
    /// 以上情况均不写入任何数据
    ///
    /// # 返回
    /// 调整后的 current_stock
    pub fn create_with_stock_adjustment(&self, movement: &StockMovement) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let stock_before: i64 = tx
            .query_row(
                "SELECT current_stock FROM components WHERE id = ?1",
                params![movement.component_id.to_string()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| RepositoryError::not_found("Component", movement.component_id))?;

        let current_stock = stock_before.checked_add(movement.quantity).ok_or_else(|| {
            RepositoryError::StockOutOfRange(format!(
                "current_stock {} + {} overflows",
                stock_before, movement.quantity
            ))
        })?;

        // 负库存由 CHECK (current_stock >= 0) 拒绝
        tx.execute(
            "UPDATE components SET current_stock = ?2, updated_at = ?3 WHERE id = ?1",
            params![
                movement.component_id.to_string(),
                current_stock,
                movement.created_at,
            ],
        )?;

        tx.execute(
            r#"
            INSERT INTO stock_movements (
                id, component_id, movement_type, quantity, reference_id,
                reference_type, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                movement.id.to_string(),
                movement.component_id.to_string(),
                movement.movement_type.as_str(),
                movement.quantity,
                movement.reference_id.map(|id| id.to_string()),
                movement.reference_type,
                movement.notes,
                movement.created_at,
            ],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!(
            component_id = %movement.component_id,
            delta = movement.quantity,
            current_stock,
            "库存变动已写入"
        );
        Ok(current_stock)
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<StockMovement>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_MOVEMENT);
        let movement = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(movement)
    }

    pub fn list(
        &self,
        filter: &StockMovementFilter,
        page: Page,
    ) -> RepositoryResult<Vec<StockMovement>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_MOVEMENT)
            .filter_eq(
                "component_id",
                filter.component_id.map(|id| Value::Text(id.to_string())),
            )
            .filter_eq(
                "movement_type",
                filter
                    .movement_type
                    .map(|t| Value::Text(t.as_str().to_string())),
            )
            .order_by("created_at DESC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let movements = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::{Component, NewComponent, NewStockMovement};
    use crate::domain::types::MovementType;
    use crate::repository::component_repo::ComponentRepository;
    use chrono::Utc;

    fn setup() -> (ComponentRepository, StockMovementRepository, Component) {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let components = ComponentRepository::new(conn.clone());
        let movements = StockMovementRepository::new(conn);

        let component = Component::from_new(
            NewComponent {
                name: "Hall sensor".to_string(),
                sku: "HS-01".to_string(),
                current_stock: 10,
                ..Default::default()
            },
            Utc::now(),
        );
        components.insert(&component).unwrap();
        (components, movements, component)
    }

    fn movement(component_id: Uuid, movement_type: MovementType, quantity: i64) -> StockMovement {
        StockMovement::from_new(
            NewStockMovement {
                component_id,
                movement_type,
                quantity,
                reference_id: None,
                reference_type: None,
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_in_out_adjustment_update_stock() {
        let (components, movements, component) = setup();

        assert_eq!(
            movements
                .create_with_stock_adjustment(&movement(component.id, MovementType::In, 5))
                .unwrap(),
            15
        );
        assert_eq!(
            movements
                .create_with_stock_adjustment(&movement(component.id, MovementType::Out, 4))
                .unwrap(),
            11
        );
        assert_eq!(
            movements
                .create_with_stock_adjustment(&movement(
                    component.id,
                    MovementType::Adjustment,
                    -1
                ))
                .unwrap(),
            10
        );

        let stored = components.find_by_id(component.id).unwrap().unwrap();
        assert_eq!(stored.current_stock, 10);

        let filter = StockMovementFilter {
            component_id: Some(component.id),
            movement_type: Some(MovementType::Out),
        };
        let outs = movements.list(&filter, Page::default()).unwrap();
        assert_eq!(outs.len(), 1);
        assert_eq!(outs[0].quantity, -4);
    }

    #[test]
    fn test_negative_result_writes_nothing() {
        let (components, movements, component) = setup();

        let err = movements
            .create_with_stock_adjustment(&movement(component.id, MovementType::Out, 11))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::CheckConstraintViolation(_)));

        let stored = components.find_by_id(component.id).unwrap().unwrap();
        assert_eq!(stored.current_stock, 10);
        assert!(movements
            .list(&StockMovementFilter::default(), Page::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_component_is_not_found() {
        let (_, movements, _) = setup();
        let err = movements
            .create_with_stock_adjustment(&movement(Uuid::new_v4(), MovementType::In, 1))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_overflowing_stock_writes_nothing() {
        let (components, movements, component) = setup();

        let err = movements
            .create_with_stock_adjustment(&movement(component.id, MovementType::In, i64::MAX))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::StockOutOfRange(_)));

        let stored = components.find_by_id(component.id).unwrap().unwrap();
        assert_eq!(stored.current_stock, 10);
        assert!(movements
            .list(&StockMovementFilter::default(), Page::default())
            .unwrap()
            .is_empty());
    }
}
