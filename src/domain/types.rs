// ==========================================
// Pentwheel 跟踪服务 - 领域类型定义
// ==========================================
// 状态/类型/优先级/库存变动均为封闭枚举
// 数据库与 JSON 中统一存储为线上字符串 (例如 "in-progress")
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 枚举解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// ==========================================
// 通用状态 (Status Type)
// ==========================================
// 退货、维修、发运共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusType {
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl StatusType {
    pub const ALL: [StatusType; 4] = [
        StatusType::Completed,
        StatusType::Pending,
        StatusType::InProgress,
        StatusType::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Completed => "completed",
            StatusType::Pending => "pending",
            StatusType::InProgress => "in-progress",
            StatusType::Cancelled => "cancelled",
        }
    }
}

impl Default for StatusType {
    fn default() -> Self {
        StatusType::Pending
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(StatusType::Completed),
            "pending" => Ok(StatusType::Pending),
            "in-progress" => Ok(StatusType::InProgress),
            "cancelled" => Ok(StatusType::Cancelled),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

// ==========================================
// 发运方向 (Shipment Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentType {
    Incoming,
    Outgoing,
}

impl ShipmentType {
    pub const ALL: [ShipmentType; 2] = [ShipmentType::Incoming, ShipmentType::Outgoing];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentType::Incoming => "incoming",
            ShipmentType::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" => Ok(ShipmentType::Incoming),
            "outgoing" => Ok(ShipmentType::Outgoing),
            other => Err(ParseEnumError {
                kind: "shipment type",
                value: other.to_string(),
            }),
        }
    }
}

// ==========================================
// 维修优先级 (Repair Priority)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl RepairPriority {
    pub const ALL: [RepairPriority; 4] = [
        RepairPriority::Low,
        RepairPriority::Medium,
        RepairPriority::High,
        RepairPriority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairPriority::Low => "low",
            RepairPriority::Medium => "medium",
            RepairPriority::High => "high",
            RepairPriority::Critical => "critical",
        }
    }
}

impl Default for RepairPriority {
    fn default() -> Self {
        RepairPriority::Medium
    }
}

impl fmt::Display for RepairPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RepairPriority::Low),
            "medium" => Ok(RepairPriority::Medium),
            "high" => Ok(RepairPriority::High),
            "critical" => Ok(RepairPriority::Critical),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

// ==========================================
// 库存变动类型 (Movement Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
        }
    }

    /// 计算对库存的带符号影响
    ///
    /// - in: +|quantity|
    /// - out: -|quantity|
    /// - adjustment: 按原符号
    pub fn signed_quantity(&self, quantity: i64) -> i64 {
        match self {
            MovementType::In => quantity.saturating_abs(),
            MovementType::Out => -quantity.saturating_abs(),
            MovementType::Adjustment => quantity,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementType::In),
            "out" => Ok(MovementType::Out),
            "adjustment" => Ok(MovementType::Adjustment),
            other => Err(ParseEnumError {
                kind: "movement type",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        for status in StatusType::ALL {
            assert_eq!(status.as_str().parse::<StatusType>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(
            serde_json::from_str::<StatusType>("\"in-progress\"").unwrap(),
            StatusType::InProgress
        );
        assert!("in_progress".parse::<StatusType>().is_err());
    }

    #[test]
    fn test_movement_signed_quantity() {
        assert_eq!(MovementType::In.signed_quantity(-5), 5);
        assert_eq!(MovementType::Out.signed_quantity(5), -5);
        assert_eq!(MovementType::Out.signed_quantity(-5), -5);
        assert_eq!(MovementType::Adjustment.signed_quantity(-3), -3);
        assert_eq!(
            serde_json::from_str::<MovementType>("\"in\"").unwrap(),
            MovementType::In
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(StatusType::default(), StatusType::Pending);
        assert_eq!(RepairPriority::default(), RepairPriority::Medium);
    }
}
