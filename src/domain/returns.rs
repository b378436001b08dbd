// ==========================================
// Pentwheel 跟踪服务 - 退货领域模型
// ==========================================
// 对齐: schema.sql returns 表
// ==========================================

use crate::domain::patch::deserialize_some;
use crate::domain::types::StatusType;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Return - 退货单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    pub id: Uuid,
    pub return_id: String, // 业务单号 (唯一)
    pub company_id: Option<Uuid>,
    pub status: StatusType,
    pub return_date: NaiveDate,
    pub reason: Option<String>,
    pub total_items: i64,
    pub total_value: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建退货请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReturn {
    pub return_id: String,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub status: StatusType,
    pub return_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_value: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 退货局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnPatch {
    #[serde(default)]
    pub return_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub company_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub status: Option<StatusType>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub reason: Option<Option<String>>,
    #[serde(default)]
    pub total_items: Option<i64>,
    #[serde(default)]
    pub total_value: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

/// 退货列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnFilter {
    pub status: Option<StatusType>,
}

impl Return {
    pub fn from_new(new: NewReturn, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            return_id: new.return_id,
            company_id: new.company_id,
            status: new.status,
            return_date: new.return_date,
            reason: new.reason,
            total_items: new.total_items,
            total_value: new.total_value,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: ReturnPatch) {
        if let Some(v) = patch.return_id {
            self.return_id = v;
        }
        if let Some(v) = patch.company_id {
            self.company_id = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.return_date {
            self.return_date = v;
        }
        if let Some(v) = patch.reason {
            self.reason = v;
        }
        if let Some(v) = patch.total_items {
            self.total_items = v;
        }
        if let Some(v) = patch.total_value {
            self.total_value = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}
