// ==========================================
// Pentwheel 跟踪服务 - 零部件与库存变动领域模型
// ==========================================
// 对齐: schema.sql components / stock_movements 表
// 低库存: current_stock <= reorder_level (仅在报表时判定, 写入不强制)
// ==========================================

use crate::domain::patch::deserialize_some;
use crate::domain::types::MovementType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Component - 零部件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: Uuid,
    pub name: String,
    pub sku: String, // 唯一
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit_cost: Decimal,
    pub supplier: Option<String>,

    // ===== 库存 =====
    pub minimum_stock: i64,
    pub current_stock: i64,
    pub reorder_level: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Component {
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.reorder_level
    }
}

/// 新建零部件请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewComponent {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub minimum_stock: i64,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub reorder_level: i64,
}

/// 零部件局部更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub supplier: Option<Option<String>>,
    #[serde(default)]
    pub minimum_stock: Option<i64>,
    #[serde(default)]
    pub current_stock: Option<i64>,
    #[serde(default)]
    pub reorder_level: Option<i64>,
}

/// 零部件列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentFilter {
    pub category: Option<String>,
    #[serde(default)]
    pub low_stock: bool,
}

impl Component {
    pub fn from_new(new: NewComponent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            sku: new.sku,
            description: new.description,
            category: new.category,
            unit_cost: new.unit_cost,
            supplier: new.supplier,
            minimum_stock: new.minimum_stock,
            current_stock: new.current_stock,
            reorder_level: new.reorder_level,
            created_at: now,
            updated_at: now,
        }
    }

    /// 逐字段应用局部更新
    pub fn apply_patch(&mut self, patch: ComponentPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.sku {
            self.sku = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.unit_cost {
            self.unit_cost = v;
        }
        if let Some(v) = patch.supplier {
            self.supplier = v;
        }
        if let Some(v) = patch.minimum_stock {
            self.minimum_stock = v;
        }
        if let Some(v) = patch.current_stock {
            self.current_stock = v;
        }
        if let Some(v) = patch.reorder_level {
            self.reorder_level = v;
        }
    }
}

// ==========================================
// StockMovement - 库存变动 (只追加)
// ==========================================
// quantity 为带符号数量: out 记为负数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub component_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reference_id: Option<Uuid>,
    pub reference_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 新建库存变动请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStockMovement {
    pub component_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i64,
    #[serde(default)]
    pub reference_id: Option<Uuid>,
    #[serde(default)]
    pub reference_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 库存变动列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockMovementFilter {
    pub component_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
}

impl StockMovement {
    pub fn from_new(new: NewStockMovement, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            component_id: new.component_id,
            movement_type: new.movement_type,
            quantity: new.movement_type.signed_quantity(new.quantity),
            reference_id: new.reference_id,
            reference_type: new.reference_type,
            notes: new.notes,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_is_inclusive() {
        let mut component = Component::from_new(
            NewComponent {
                name: "Control Board".to_string(),
                sku: "PWH-PCB-001".to_string(),
                current_stock: 5,
                reorder_level: 5,
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(component.is_low_stock());

        component.current_stock = 6;
        assert!(!component.is_low_stock());
    }

    #[test]
    fn test_out_movement_is_stored_negative() {
        let movement = StockMovement::from_new(
            NewStockMovement {
                component_id: Uuid::new_v4(),
                movement_type: MovementType::Out,
                quantity: 4,
                reference_id: None,
                reference_type: Some("manual_adjustment".to_string()),
                notes: None,
            },
            Utc::now(),
        );
        assert_eq!(movement.quantity, -4);
    }
}
