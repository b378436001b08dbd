// ==========================================
// Pentwheel 跟踪服务 - 行解码/编码辅助
// ==========================================
// 存储格式: UUID/枚举 = TEXT, 定点小数 = INTEGER (1/100)
// 解码失败一律返回 FromSqlConversionFailure, 不做静默兜底
// ==========================================

use crate::domain::money;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

fn conversion_failure<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn get_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_failure(idx, e))
}

pub(crate) fn get_opt_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| Uuid::parse_str(&raw).map_err(|e| conversion_failure(idx, e)))
        .transpose()
}

/// 解码枚举列 (线上字符串)
pub(crate) fn get_enum<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| conversion_failure(idx, e))
}

/// 解码定点小数列, NULL 视为 0
pub(crate) fn get_decimal(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    Ok(money::from_hundredths(row.get::<_, Option<i64>>(idx)?.unwrap_or(0)))
}

pub(crate) fn get_opt_decimal(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    Ok(row.get::<_, Option<i64>>(idx)?.map(money::from_hundredths))
}

/// 编码定点小数
pub(crate) fn hundredths(field: &str, value: Decimal) -> RepositoryResult<i64> {
    money::to_hundredths(value).ok_or_else(|| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("{} is out of range", value),
    })
}

pub(crate) fn opt_hundredths(field: &str, value: Option<Decimal>) -> RepositoryResult<Option<i64>> {
    value.map(|v| hundredths(field, v)).transpose()
}
