// ==========================================
// Pentwheel 跟踪服务 - 周预算领域模型
// ==========================================
// 对齐: schema.sql budget_entries 表
// 一周 = 同一 week_start 下按 category 拆分的多条记录
// ==========================================

use crate::domain::patch::deserialize_some;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// BudgetEntry - 预算条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub category: String,
    pub budgeted_amount: Decimal,
    pub actual_amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建预算条目请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudgetEntry {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub category: String,
    pub budgeted_amount: Decimal,
    #[serde(default)]
    pub actual_amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// 预算条目局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetEntryPatch {
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    #[serde(default)]
    pub week_end: Option<NaiveDate>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub budgeted_amount: Option<Decimal>,
    #[serde(default)]
    pub actual_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

/// 预算条目列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetEntryFilter {
    pub category: Option<String>,
    pub week_start: Option<NaiveDate>,
}

impl BudgetEntry {
    pub fn from_new(new: NewBudgetEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            week_start: new.week_start,
            week_end: new.week_end,
            category: new.category,
            budgeted_amount: new.budgeted_amount,
            actual_amount: new.actual_amount,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: BudgetEntryPatch) {
        if let Some(v) = patch.week_start {
            self.week_start = v;
        }
        if let Some(v) = patch.week_end {
            self.week_end = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.budgeted_amount {
            self.budgeted_amount = v;
        }
        if let Some(v) = patch.actual_amount {
            self.actual_amount = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
    }

    /// 单条目差异 (实际 - 预算)
    pub fn variance(&self) -> Decimal {
        self.actual_amount - self.budgeted_amount
    }
}
