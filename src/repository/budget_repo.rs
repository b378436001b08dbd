// ==========================================
// Pentwheel 跟踪服务 - 周预算数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::budget::{BudgetEntry, BudgetEntryFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{get_decimal, get_uuid, hundredths};
use crate::repository::sql_builder::{Page, SqlQueryBuilder};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_BUDGET: &str = r#"
    SELECT id, week_start, week_end, category, budgeted_amount, actual_amount,
           description, created_at, updated_at
    FROM budget_entries
"#;

// ==========================================
// BudgetRepository - 周预算仓储
// ==========================================
pub struct BudgetRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BudgetRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<BudgetEntry> {
        Ok(BudgetEntry {
            id: get_uuid(row, 0)?,
            week_start: row.get(1)?,
            week_end: row.get(2)?,
            category: row.get(3)?,
            budgeted_amount: get_decimal(row, 4)?,
            actual_amount: get_decimal(row, 5)?,
            description: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    pub fn insert(&self, entry: &BudgetEntry) -> RepositoryResult<()> {
        let budgeted = hundredths("budgeted_amount", entry.budgeted_amount)?;
        let actual = hundredths("actual_amount", entry.actual_amount)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO budget_entries (
                id, week_start, week_end, category, budgeted_amount, actual_amount,
                description, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                entry.id.to_string(),
                entry.week_start,
                entry.week_end,
                entry.category,
                budgeted,
                actual,
                entry.description,
                entry.created_at,
                entry.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<BudgetEntry>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_BUDGET);
        let entry = conn
            .query_row(&sql, params![id.to_string()], Self::map_row)
            .optional()?;
        Ok(entry)
    }

    /// 按 week_start 精确匹配, 按写入顺序返回
    pub fn find_by_week_start(&self, week_start: NaiveDate) -> RepositoryResult<Vec<BudgetEntry>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE week_start = ?1 ORDER BY created_at ASC, rowid ASC",
            SELECT_BUDGET
        );
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params![week_start], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn list(&self, filter: &BudgetEntryFilter, page: Page) -> RepositoryResult<Vec<BudgetEntry>> {
        let conn = self.get_conn()?;
        let (sql, values) = SqlQueryBuilder::new(SELECT_BUDGET)
            .filter_eq("category", filter.category.clone().map(Value::Text))
            .filter_eq(
                "week_start",
                filter
                    .week_start
                    .map(|d| Value::Text(d.format("%Y-%m-%d").to_string())),
            )
            .order_by("week_start DESC, category ASC, id ASC")
            .page(page)
            .build();

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// 覆盖写入全部可更新列
    pub fn update(&self, entry: &BudgetEntry) -> RepositoryResult<()> {
        let budgeted = hundredths("budgeted_amount", entry.budgeted_amount)?;
        let actual = hundredths("actual_amount", entry.actual_amount)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE budget_entries SET
                week_start = ?2, week_end = ?3, category = ?4, budgeted_amount = ?5,
                actual_amount = ?6, description = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
            params![
                entry.id.to_string(),
                entry.week_start,
                entry.week_end,
                entry.category,
                budgeted,
                actual,
                entry.description,
                entry.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Budget entry", entry.id));
        }
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM budget_entries WHERE id = ?1",
            params![id.to_string()],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Budget entry", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::NewBudgetEntry;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn make_entry(week_start: NaiveDate, category: &str) -> BudgetEntry {
        BudgetEntry::from_new(
            NewBudgetEntry {
                week_start,
                week_end: week_start + chrono::Duration::days(6),
                category: category.to_string(),
                budgeted_amount: Decimal::new(100000, 2),
                actual_amount: Decimal::new(120000, 2),
                description: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_week_start_exact_match_and_ordering() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let repo = BudgetRepository::new(conn);

        let w1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let w2 = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        repo.insert(&make_entry(w1, "parts")).unwrap();
        repo.insert(&make_entry(w1, "labor")).unwrap();
        repo.insert(&make_entry(w2, "parts")).unwrap();

        let week = repo.find_by_week_start(w1).unwrap();
        let categories: Vec<&str> = week.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["parts", "labor"]);
        assert_eq!(week[0].actual_amount, Decimal::new(120000, 2));

        let listed = repo
            .list(&BudgetEntryFilter::default(), Page::default())
            .unwrap();
        assert_eq!(listed[0].week_start, w2);

        let filter = BudgetEntryFilter {
            category: Some("parts".to_string()),
            week_start: Some(w1),
        };
        assert_eq!(repo.list(&filter, Page::default()).unwrap().len(), 1);
    }
}
