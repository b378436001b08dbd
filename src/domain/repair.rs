// ==========================================
// Pentwheel 跟踪服务 - 维修领域模型
// ==========================================
// 对齐: schema.sql repairs / repair_components 表
// 派生: total_cost = labor_cost + parts_cost
// ==========================================

use crate::domain::patch::deserialize_some;
use crate::domain::types::{RepairPriority, StatusType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Repair - 维修单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repair {
    pub id: Uuid,
    pub repair_id: String, // 业务单号 (唯一)
    pub customer_name: Option<String>,
    pub device_model: Option<String>,
    pub issue_description: String,
    pub status: StatusType,
    pub priority: RepairPriority,

    // ===== 时间节点 =====
    pub start_date: Option<DateTime<Utc>>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub actual_completion: Option<DateTime<Utc>>,

    pub assigned_technician: Option<String>,

    // ===== 费用 (两位小数) =====
    pub labor_cost: Decimal,
    pub parts_cost: Decimal,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repair {
    pub fn total_cost(&self) -> Decimal {
        self.labor_cost + self.parts_cost
    }
}

/// 维修单响应 (附带派生总费用)
#[derive(Debug, Clone, Serialize)]
pub struct RepairView {
    #[serde(flatten)]
    pub repair: Repair,
    pub total_cost: Decimal,
}

impl From<Repair> for RepairView {
    fn from(repair: Repair) -> Self {
        let total_cost = repair.total_cost();
        Self { repair, total_cost }
    }
}

/// 新建维修单请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRepair {
    pub repair_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub device_model: Option<String>,
    pub issue_description: String,
    #[serde(default)]
    pub status: StatusType,
    #[serde(default)]
    pub priority: RepairPriority,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_technician: Option<String>,
    #[serde(default)]
    pub labor_cost: Decimal,
    #[serde(default)]
    pub parts_cost: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 维修单局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepairPatch {
    #[serde(default)]
    pub repair_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub customer_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub device_model: Option<Option<String>>,
    #[serde(default)]
    pub issue_description: Option<String>,
    #[serde(default)]
    pub status: Option<StatusType>,
    #[serde(default)]
    pub priority: Option<RepairPriority>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub estimated_completion: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub actual_completion: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_technician: Option<Option<String>>,
    #[serde(default)]
    pub labor_cost: Option<Decimal>,
    #[serde(default)]
    pub parts_cost: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

/// 维修单列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepairFilter {
    pub status: Option<StatusType>,
    pub priority: Option<RepairPriority>,
}

impl Repair {
    pub fn from_new(new: NewRepair, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            repair_id: new.repair_id,
            customer_name: new.customer_name,
            device_model: new.device_model,
            issue_description: new.issue_description,
            status: new.status,
            priority: new.priority,
            start_date: new.start_date,
            estimated_completion: new.estimated_completion,
            actual_completion: new.actual_completion,
            assigned_technician: new.assigned_technician,
            labor_cost: new.labor_cost,
            parts_cost: new.parts_cost,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: RepairPatch) {
        if let Some(v) = patch.repair_id {
            self.repair_id = v;
        }
        if let Some(v) = patch.customer_name {
            self.customer_name = v;
        }
        if let Some(v) = patch.device_model {
            self.device_model = v;
        }
        if let Some(v) = patch.issue_description {
            self.issue_description = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.priority {
            self.priority = v;
        }
        if let Some(v) = patch.start_date {
            self.start_date = v;
        }
        if let Some(v) = patch.estimated_completion {
            self.estimated_completion = v;
        }
        if let Some(v) = patch.actual_completion {
            self.actual_completion = v;
        }
        if let Some(v) = patch.assigned_technician {
            self.assigned_technician = v;
        }
        if let Some(v) = patch.labor_cost {
            self.labor_cost = v;
        }
        if let Some(v) = patch.parts_cost {
            self.parts_cost = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}

// ==========================================
// RepairComponent - 维修用料
// ==========================================
// 派生: total_cost = quantity_used × cost_per_unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairComponent {
    pub id: Uuid,
    pub repair_id: Uuid,
    pub component_id: Uuid,
    pub quantity_needed: i64,
    pub quantity_used: i64,
    pub cost_per_unit: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RepairComponent {
    pub fn total_cost(&self) -> Decimal {
        Decimal::from(self.quantity_used) * self.cost_per_unit
    }
}

/// 维修用料响应 (附带派生总费用)
#[derive(Debug, Clone, Serialize)]
pub struct RepairComponentView {
    #[serde(flatten)]
    pub link: RepairComponent,
    pub total_cost: Decimal,
}

impl From<RepairComponent> for RepairComponentView {
    fn from(link: RepairComponent) -> Self {
        let total_cost = link.total_cost();
        Self { link, total_cost }
    }
}

fn default_quantity_needed() -> i64 {
    1
}

/// 新建维修用料请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRepairComponent {
    pub repair_id: Uuid,
    pub component_id: Uuid,
    #[serde(default = "default_quantity_needed")]
    pub quantity_needed: i64,
    #[serde(default)]
    pub quantity_used: i64,
    #[serde(default)]
    pub cost_per_unit: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 维修用料局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepairComponentPatch {
    #[serde(default)]
    pub repair_id: Option<Uuid>,
    #[serde(default)]
    pub component_id: Option<Uuid>,
    #[serde(default)]
    pub quantity_needed: Option<i64>,
    #[serde(default)]
    pub quantity_used: Option<i64>,
    #[serde(default)]
    pub cost_per_unit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

/// 维修用料列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepairComponentFilter {
    pub repair_id: Option<Uuid>,
}

impl RepairComponent {
    pub fn from_new(new: NewRepairComponent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            repair_id: new.repair_id,
            component_id: new.component_id,
            quantity_needed: new.quantity_needed,
            quantity_used: new.quantity_used,
            cost_per_unit: new.cost_per_unit,
            notes: new.notes,
            created_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: RepairComponentPatch) {
        if let Some(v) = patch.repair_id {
            self.repair_id = v;
        }
        if let Some(v) = patch.component_id {
            self.component_id = v;
        }
        if let Some(v) = patch.quantity_needed {
            self.quantity_needed = v;
        }
        if let Some(v) = patch.quantity_used {
            self.quantity_used = v;
        }
        if let Some(v) = patch.cost_per_unit {
            self.cost_per_unit = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repair() -> Repair {
        Repair::from_new(
            NewRepair {
                repair_id: "SRV-001".to_string(),
                customer_name: None,
                device_model: Some("PWH-Model-X".to_string()),
                issue_description: "No power".to_string(),
                status: StatusType::Pending,
                priority: RepairPriority::High,
                start_date: None,
                estimated_completion: None,
                actual_completion: None,
                assigned_technician: None,
                labor_cost: Decimal::new(1000, 2),
                parts_cost: Decimal::new(550, 2),
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_repair_view_carries_total_cost() {
        let view = RepairView::from(sample_repair());
        assert_eq!(view.total_cost, Decimal::new(1550, 2));

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["total_cost"].is_number());
        assert_eq!(json["total_cost"].to_string(), "15.50");
        assert_eq!(json["repair_id"], "SRV-001");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn test_repair_patch_clears_nullable_and_keeps_rest() {
        let mut repair = sample_repair();
        let patch: RepairPatch =
            serde_json::from_str(r#"{"status": "in-progress", "device_model": null}"#).unwrap();
        repair.apply_patch(patch);

        assert_eq!(repair.status, StatusType::InProgress);
        assert_eq!(repair.device_model, None);
        assert_eq!(repair.priority, RepairPriority::High);
        assert_eq!(repair.labor_cost, Decimal::new(1000, 2));
    }

    #[test]
    fn test_repair_component_defaults_and_total() {
        let new: NewRepairComponent = serde_json::from_str(&format!(
            r#"{{"repair_id": "{}", "component_id": "{}", "quantity_used": 3, "cost_per_unit": 12.50}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();
        assert_eq!(new.quantity_needed, 1);

        let link = RepairComponent::from_new(new, Utc::now());
        assert_eq!(link.total_cost(), Decimal::new(3750, 2));
    }
}
