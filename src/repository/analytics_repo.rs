// ==========================================
// Pentwheel 跟踪服务 - 统计查询仓储
// ==========================================
// 职责: 只读分组/聚合查询, 产出原始分组行
// 派生字段 (差额/百分比/排序) 由 engine::analytics 计算
// ==========================================

use crate::domain::analytics::{
    DashboardCounts, RepairPriorityGroup, RepairStatusGroup, ShipmentGroup, StockLevelRow,
};
use crate::domain::types::ShipmentType;
use crate::repository::component_repo::LOW_STOCK_CONDITION;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_decimal, get_enum, get_opt_decimal, get_uuid};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// AnalyticsRepository - 统计查询仓储
// ==========================================
pub struct AnalyticsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AnalyticsRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 维修单按状态分组 (数量 + 人工/配件费用合计)
    pub fn repair_status_groups(&self) -> RepositoryResult<Vec<RepairStatusGroup>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT status, COUNT(*),
                   SUM(COALESCE(labor_cost, 0) + COALESCE(parts_cost, 0))
            FROM repairs
            GROUP BY status
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RepairStatusGroup {
                    status: get_enum(row, 0)?,
                    count: row.get(1)?,
                    total_cost: get_opt_decimal(row, 2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// 维修单按优先级分组
    pub fn repair_priority_groups(&self) -> RepositoryResult<Vec<RepairPriorityGroup>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT priority, COUNT(*) FROM repairs GROUP BY priority")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RepairPriorityGroup {
                    priority: get_enum(row, 0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// 低库存零部件 (current_stock <= reorder_level)
    pub fn low_stock_rows(&self) -> RepositoryResult<Vec<StockLevelRow>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT id, name, sku, current_stock, reorder_level FROM components WHERE {}",
            LOW_STOCK_CONDITION
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StockLevelRow {
                    id: get_uuid(row, 0)?,
                    name: row.get(1)?,
                    sku: row.get(2)?,
                    current_stock: row.get(3)?,
                    reorder_level: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// 发运按 (方向, 状态) 交叉分组
    pub fn shipment_groups(&self) -> RepositoryResult<Vec<ShipmentGroup>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT type, status, COUNT(*), SUM(total_units) FROM shipments GROUP BY type, status",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ShipmentGroup {
                    shipment_type: get_enum(row, 0)?,
                    status: get_enum(row, 1)?,
                    count: row.get(2)?,
                    total_units: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// 看板计数 (自 since 当天起)
    ///
    /// - 入库发运: estimated_arrival >= since
    /// - 出库发运: created_at >= since
    /// - 预算: week_start >= since
    pub fn dashboard_counts(&self, since: NaiveDate) -> RepositoryResult<DashboardCounts> {
        let conn = self.get_conn()?;

        let incoming_shipments: i64 = conn.query_row(
            "SELECT COUNT(*) FROM shipments WHERE type = ?1 AND estimated_arrival >= ?2",
            params![ShipmentType::Incoming.as_str(), since],
            |row| row.get(0),
        )?;

        let outgoing_shipments: i64 = conn.query_row(
            "SELECT COUNT(*) FROM shipments WHERE type = ?1 AND created_at >= ?2",
            params![ShipmentType::Outgoing.as_str(), since],
            |row| row.get(0),
        )?;

        let (total_budget, total_used) = conn.query_row(
            r#"
            SELECT SUM(budgeted_amount), SUM(COALESCE(actual_amount, 0))
            FROM budget_entries
            WHERE week_start >= ?1
            "#,
            params![since],
            |row| Ok((get_decimal(row, 0)?, get_decimal(row, 1)?)),
        )?;

        Ok(DashboardCounts {
            incoming_shipments,
            outgoing_shipments,
            total_budget,
            total_used,
        })
    }
}
