// ==========================================
// Pentwheel 跟踪服务 - 发运数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::shipment::{Shipment, ShipmentFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_enum, get_opt_decimal, get_uuid, opt_hundredths};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_SHIPMENT: &str = r#"
    SELECT id, shipment_id, type, origin, destination, carrier, tracking_number,
           serial_start, serial_end, total_units, weight_kg, estimated_arrival,
           actual_arrival, status, notes, created_at, updated_at
    FROM shipments
"#;

// ==========================================
// ShipmentRepository - 发运仓储
// ==========================================
pub struct ShipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShipmentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Shipment> {
        Ok(Shipment {
            id: get_uuid(row, 0)?,
            shipment_id: row.get(1)?,
            shipment_type: get_enum(row, 2)?,
            origin: row.get(3)?,
            destination: row.get(4)?,
            carrier: row.get(5)?,
            tracking_number: row.get(6)?,
            serial_start: row.get(7)?,
            serial_end: row.get(8)?,
            total_units: row.get::<_, Option<i64>>(9)?.unwrap_or(0),
            weight_kg: get_opt_decimal(row, 10)?,
            estimated_arrival: row.get(11)?,
            actual_arrival: row.get(12)?,
            status: get_enum(row, 13)?,
            notes: row.get(14)?,
            created_at: row.get(15)?,
            updated_at: row.get(16)?,
        })
    }

    pub fn insert(&self, shipment: &Shipment) -> RepositoryResult<()> {
        let weight_kg = opt_hundredths("weight_kg", shipment.weight_kg)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO shipments (
                id, shipment_id, type, origin, destination, carrier, tracking_number,
                serial_start, serial_end, total_units, weight_kg, estimated_arrival,
                actual_arrival, status, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
            "#,
            params![
                shipment.id.to_string(),
                shipment.shipment_id,
                shipment.shipment_type.as_str(),
                shipment.origin,
                shipment.destination,
                shipment.carrier,
                shipment.tracking_number,
                shipment.serial_start,
                shipment.serial_end,
                shipment.total_units,
                weight_kg,
                shipment.estimated_arrival,
                shipment.actual_arrival,
                shipment.status.as_str(),
                shipment.notes,
                shipment.created_at,
                shipment.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Shipment>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_SHIPMENT);
        let shipment = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(shipment)
    }

    pub fn list(&self, filter: &ShipmentFilter, page: Page) -> RepositoryResult<Vec<Shipment>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_SHIPMENT)
            .filter_eq(
                "type",
                filter
                    .shipment_type
                    .map(|t| Value::Text(t.as_str().to_string())),
            )
            .filter_eq(
                "status",
                filter.status.map(|s| Value::Text(s.as_str().to_string())),
            )
            .order_by("created_at DESC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let shipments = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(shipments)
    }

    /// 覆盖写入全部可更新列
    pub fn update(&self, shipment: &Shipment) -> RepositoryResult<()> {
        let weight_kg = opt_hundredths("weight_kg", shipment.weight_kg)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE shipments SET
                shipment_id = ?2, type = ?3, origin = ?4, destination = ?5,
                carrier = ?6, tracking_number = ?7, serial_start = ?8, serial_end = ?9,
                total_units = ?10, weight_kg = ?11, estimated_arrival = ?12,
                actual_arrival = ?13, status = ?14, notes = ?15, updated_at = ?16
            WHERE id = ?1
            "#,
            params![
                shipment.id.to_string(),
                shipment.shipment_id,
                shipment.shipment_type.as_str(),
                shipment.origin,
                shipment.destination,
                shipment.carrier,
                shipment.tracking_number,
                shipment.serial_start,
                shipment.serial_end,
                shipment.total_units,
                weight_kg,
                shipment.estimated_arrival,
                shipment.actual_arrival,
                shipment.status.as_str(),
                shipment.notes,
                shipment.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Shipment", shipment.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected =
            conn.execute("DELETE FROM shipments WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Shipment", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipment::NewShipment;
    use crate::domain::types::{ShipmentType, StatusType};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn make_shipment(shipment_id: &str, shipment_type: ShipmentType) -> Shipment {
        Shipment::from_new(
            NewShipment {
                shipment_id: shipment_id.to_string(),
                shipment_type,
                origin: Some("Shenzhen".to_string()),
                destination: Some("Rotterdam".to_string()),
                carrier: None,
                tracking_number: None,
                serial_start: Some("SN-0001".to_string()),
                serial_end: Some("SN-0250".to_string()),
                total_units: 250,
                weight_kg: Some(Decimal::new(12075, 2)),
                estimated_arrival: None,
                actual_arrival: None,
                status: StatusType::InProgress,
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_round_trip_and_type_filter() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let repo = ShipmentRepository::new(conn);

        let incoming = make_shipment("SHP-IN-1", ShipmentType::Incoming);
        repo.insert(&incoming).unwrap();
        repo.insert(&make_shipment("SHP-OUT-1", ShipmentType::Outgoing))
            .unwrap();

        let found = repo.find_by_id(incoming.id).unwrap().unwrap();
        assert_eq!(found.weight_kg, Some(Decimal::new(12075, 2)));
        assert_eq!(found.total_units, 250);

        let filter = ShipmentFilter {
            shipment_type: Some(ShipmentType::Outgoing),
            status: None,
        };
        let outgoing = repo.list(&filter, Page::default()).unwrap();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].shipment_id, "SHP-OUT-1");
    }
}
