// ==========================================
// Pentwheel 跟踪服务 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("{entity} not found (id={id})")]
    NotFound { entity: String, id: String },

    #[error("database lock poisoned: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("check constraint violated: {0}")]
    CheckConstraintViolation(String),

    #[error("stock out of range: {0}")]
    StockOutOfRange(String),

    // ===== 数据质量错误 =====
    /// 写入值不合法 (例如金额超出存储范围)
    #[error("invalid value for field {field}: {message}")]
    FieldValueError { field: String, message: String },

    /// 库中已存值无法解码
    #[error("failed to decode stored value in {column}: {message}")]
    DataDecodeError { column: String, message: String },

    // ===== 通用错误 =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else if msg.contains("CHECK") {
                    RepositoryError::CheckConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            rusqlite::Error::FromSqlConversionFailure(idx, _, cause) => {
                RepositoryError::DataDecodeError {
                    column: format!("column #{}", idx),
                    message: cause.to_string(),
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_sqlite_constraint_classification() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (k TEXT UNIQUE, n INTEGER CHECK (n >= 0));
             INSERT INTO t (k, n) VALUES ('a', 1);",
        )
        .unwrap();

        let dup = conn
            .execute("INSERT INTO t (k, n) VALUES ('a', 2)", [])
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(dup),
            RepositoryError::UniqueConstraintViolation(_)
        ));

        let negative = conn
            .execute("INSERT INTO t (k, n) VALUES ('b', -1)", [])
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(negative),
            RepositoryError::CheckConstraintViolation(_)
        ));
    }

    #[test]
    fn test_stored_value_decode_failure_is_not_input_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id TEXT); INSERT INTO t (id) VALUES ('not-a-uuid');")
            .unwrap();

        let err = conn
            .query_row("SELECT id FROM t", [], |row| {
                crate::repository::row::get_uuid(row, 0)
            })
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::DataDecodeError { .. }
        ));
    }

    #[test]
    fn test_not_found_message() {
        let err = RepositoryError::not_found("Component", "abc");
        assert_eq!(err.to_string(), "Component not found (id=abc)");
    }
}
