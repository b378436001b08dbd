// ==========================================
// Pentwheel 跟踪服务 - SQL 构建工具
// ==========================================
// 职责: 列表查询的可选过滤条件 + 分页
// 约束: 过滤值一律参数化绑定
// ==========================================

use rusqlite::types::Value;

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// SQL 查询构建器
///
/// # 示例
/// ```
/// use pentwheel_api::repository::sql_builder::{Page, SqlQueryBuilder};
///
/// let (sql, params) = SqlQueryBuilder::new("SELECT id FROM repairs")
///     .filter_eq("status", Some("pending".to_string().into()))
///     .filter_eq("priority", None)
///     .order_by("created_at DESC")
///     .page(Page::new(20, 10))
///     .build();
///
/// assert_eq!(
///     sql,
///     "SELECT id FROM repairs WHERE status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
/// );
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    select_clause: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_clause: Option<String>,
    page: Option<Page>,
}

impl SqlQueryBuilder {
    /// 创建新的 SQL 查询构建器
    pub fn new(select: &str) -> Self {
        Self {
            select_clause: select.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_clause: None,
            page: None,
        }
    }

    /// 添加不带参数的 WHERE 条件
    pub fn where_clause(mut self, condition: &str) -> Self {
        self.where_clauses.push(condition.to_string());
        self
    }

    /// 值存在时添加 `column = ?` 条件
    pub fn filter_eq(mut self, column: &str, value: Option<Value>) -> Self {
        if let Some(v) = value {
            self.where_clauses.push(format!("{} = ?", column));
            self.params.push(v);
        }
        self
    }

    /// 添加 ORDER BY 子句
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 添加 LIMIT/OFFSET
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// 构建最终的 SQL 语句与绑定参数
    pub fn build(self) -> (String, Vec<Value>) {
        let mut sql = self.select_clause;
        let mut params = self.params;

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(page) = self.page {
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(Value::Integer(i64::from(page.limit)));
            params.push(Value::Integer(i64::from(page.skip)));
        }

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_builder_without_filters() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM companies")
            .order_by("created_at ASC")
            .build();

        assert_eq!(sql, "SELECT * FROM companies ORDER BY created_at ASC");
        assert!(params.is_empty());
    }

    #[test]
    fn test_sql_builder_mixes_raw_and_bound_conditions() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM components")
            .filter_eq("category", Some(Value::Text("Sensors".to_string())))
            .where_clause("current_stock <= reorder_level")
            .page(Page::default())
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM components WHERE category = ? AND current_stock <= reorder_level LIMIT ? OFFSET ?"
        );
        assert_eq!(
            params,
            vec![
                Value::Text("Sensors".to_string()),
                Value::Integer(100),
                Value::Integer(0)
            ]
        );
    }
}
