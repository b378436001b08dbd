// ==========================================
// Pentwheel 跟踪服务 - 定点小数工具
// ==========================================
// 金额/重量均为两位小数 (NUMERIC(p,2))
// 存储: INTEGER, 单位 1/100, 保证 SQL SUM 精确
// 计算: rust_decimal::Decimal, 禁止使用浮点
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};

/// 小数位数
pub const SCALE: u32 = 2;

/// 按 NUMERIC(p,2) 语义取整 (四舍五入, 远离零)
pub fn normalize(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded
}

/// Decimal → 1/100 整数
///
/// 超出 i64 范围时返回 None
pub fn to_hundredths(value: Decimal) -> Option<i64> {
    i64::try_from(normalize(value).mantissa()).ok()
}

/// 1/100 整数 → Decimal
pub fn from_hundredths(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip_keeps_two_places() {
        let value = Decimal::from_str("1200.5").unwrap();
        assert_eq!(to_hundredths(value), Some(120050));
        assert_eq!(from_hundredths(120050).to_string(), "1200.50");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(to_hundredths(Decimal::from_str("10.005").unwrap()), Some(1001));
        assert_eq!(to_hundredths(Decimal::from_str("-10.005").unwrap()), Some(-1001));
        assert_eq!(to_hundredths(Decimal::from_str("10.004").unwrap()), Some(1000));
    }

    #[test]
    fn test_integer_input() {
        assert_eq!(to_hundredths(Decimal::from(15)), Some(1500));
        assert_eq!(normalize(Decimal::from(15)).to_string(), "15.00");
    }
}
