// ==========================================
// Pentwheel 跟踪服务 - 发运领域模型
// ==========================================
// 对齐: schema.sql shipments 表
// ==========================================

use crate::domain::patch::deserialize_some;
use crate::domain::types::{ShipmentType, StatusType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Shipment - 发运单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: Uuid,
    pub shipment_id: String, // 业务单号 (唯一)
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,

    // ===== 序列号区间 =====
    pub serial_start: Option<String>,
    pub serial_end: Option<String>,

    pub total_units: i64,
    pub weight_kg: Option<Decimal>,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub status: StatusType,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建发运单请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShipment {
    pub shipment_id: String,
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub serial_start: Option<String>,
    #[serde(default)]
    pub serial_end: Option<String>,
    #[serde(default)]
    pub total_units: i64,
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub estimated_arrival: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_arrival: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: StatusType,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 发运单局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentPatch {
    #[serde(default)]
    pub shipment_id: Option<String>,
    #[serde(default, rename = "type")]
    pub shipment_type: Option<ShipmentType>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub origin: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub destination: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub carrier: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub tracking_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub serial_start: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub serial_end: Option<Option<String>>,
    #[serde(default)]
    pub total_units: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub weight_kg: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub estimated_arrival: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub actual_arrival: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub status: Option<StatusType>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

/// 发运单列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentFilter {
    #[serde(rename = "type")]
    pub shipment_type: Option<ShipmentType>,
    pub status: Option<StatusType>,
}

impl Shipment {
    pub fn from_new(new: NewShipment, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            shipment_id: new.shipment_id,
            shipment_type: new.shipment_type,
            origin: new.origin,
            destination: new.destination,
            carrier: new.carrier,
            tracking_number: new.tracking_number,
            serial_start: new.serial_start,
            serial_end: new.serial_end,
            total_units: new.total_units,
            weight_kg: new.weight_kg,
            estimated_arrival: new.estimated_arrival,
            actual_arrival: new.actual_arrival,
            status: new.status,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: ShipmentPatch) {
        if let Some(v) = patch.shipment_id {
            self.shipment_id = v;
        }
        if let Some(v) = patch.shipment_type {
            self.shipment_type = v;
        }
        if let Some(v) = patch.origin {
            self.origin = v;
        }
        if let Some(v) = patch.destination {
            self.destination = v;
        }
        if let Some(v) = patch.carrier {
            self.carrier = v;
        }
        if let Some(v) = patch.tracking_number {
            self.tracking_number = v;
        }
        if let Some(v) = patch.serial_start {
            self.serial_start = v;
        }
        if let Some(v) = patch.serial_end {
            self.serial_end = v;
        }
        if let Some(v) = patch.total_units {
            self.total_units = v;
        }
        if let Some(v) = patch.weight_kg {
            self.weight_kg = v;
        }
        if let Some(v) = patch.estimated_arrival {
            self.estimated_arrival = v;
        }
        if let Some(v) = patch.actual_arrival {
            self.actual_arrival = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}
