// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use pentwheel_api::domain::{
    NewBudgetEntry, NewComponent, NewRepair, NewShipment, NewStockMovement,
};
use pentwheel_api::{MovementType, RepairPriority, ShipmentType, StatusType};
use rust_decimal::Decimal;
use uuid::Uuid;

/// "12.50" -> Decimal
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// NewRepair 构建器
// ==========================================

pub struct RepairBuilder {
    repair_id: String,
    issue_description: String,
    status: StatusType,
    priority: RepairPriority,
    labor_cost: Decimal,
    parts_cost: Decimal,
    device_model: Option<String>,
}

impl RepairBuilder {
    pub fn new(repair_id: &str) -> Self {
        Self {
            repair_id: repair_id.to_string(),
            issue_description: "Screen flicker".to_string(),
            status: StatusType::Pending,
            priority: RepairPriority::Medium,
            labor_cost: Decimal::ZERO,
            parts_cost: Decimal::ZERO,
            device_model: None,
        }
    }

    pub fn status(mut self, status: StatusType) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: RepairPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn costs(mut self, labor: &str, parts: &str) -> Self {
        self.labor_cost = dec(labor);
        self.parts_cost = dec(parts);
        self
    }

    pub fn device_model(mut self, model: &str) -> Self {
        self.device_model = Some(model.to_string());
        self
    }

    pub fn build(self) -> NewRepair {
        NewRepair {
            repair_id: self.repair_id,
            customer_name: None,
            device_model: self.device_model,
            issue_description: self.issue_description,
            status: self.status,
            priority: self.priority,
            start_date: None,
            estimated_completion: None,
            actual_completion: None,
            assigned_technician: None,
            labor_cost: self.labor_cost,
            parts_cost: self.parts_cost,
            notes: None,
        }
    }
}

// ==========================================
// NewComponent 构建器
// ==========================================

pub struct ComponentBuilder {
    inner: NewComponent,
}

impl ComponentBuilder {
    pub fn new(name: &str, sku: &str) -> Self {
        Self {
            inner: NewComponent {
                name: name.to_string(),
                sku: sku.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn stock(mut self, current_stock: i64, reorder_level: i64) -> Self {
        self.inner.current_stock = current_stock;
        self.inner.reorder_level = reorder_level;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.inner.category = Some(category.to_string());
        self
    }

    pub fn unit_cost(mut self, cost: &str) -> Self {
        self.inner.unit_cost = dec(cost);
        self
    }

    pub fn build(self) -> NewComponent {
        self.inner
    }
}

// ==========================================
// NewShipment 构建器
// ==========================================

pub struct ShipmentBuilder {
    shipment_id: String,
    shipment_type: ShipmentType,
    status: StatusType,
    total_units: i64,
    estimated_arrival: Option<DateTime<Utc>>,
}

impl ShipmentBuilder {
    pub fn new(shipment_id: &str, shipment_type: ShipmentType) -> Self {
        Self {
            shipment_id: shipment_id.to_string(),
            shipment_type,
            status: StatusType::Pending,
            total_units: 0,
            estimated_arrival: None,
        }
    }

    pub fn status(mut self, status: StatusType) -> Self {
        self.status = status;
        self
    }

    pub fn units(mut self, units: i64) -> Self {
        self.total_units = units;
        self
    }

    pub fn arriving(mut self, at: DateTime<Utc>) -> Self {
        self.estimated_arrival = Some(at);
        self
    }

    pub fn build(self) -> NewShipment {
        NewShipment {
            shipment_id: self.shipment_id,
            shipment_type: self.shipment_type,
            origin: None,
            destination: None,
            carrier: None,
            tracking_number: None,
            serial_start: None,
            serial_end: None,
            total_units: self.total_units,
            weight_kg: None,
            estimated_arrival: self.estimated_arrival,
            actual_arrival: None,
            status: self.status,
            notes: None,
        }
    }
}

// ==========================================
// NewBudgetEntry 构建器
// ==========================================

pub struct BudgetBuilder {
    inner: NewBudgetEntry,
}

impl BudgetBuilder {
    /// 默认 week_end = week_start + 6 天
    pub fn new(week_start: NaiveDate, category: &str) -> Self {
        Self {
            inner: NewBudgetEntry {
                week_start,
                week_end: week_start + chrono::Duration::days(6),
                category: category.to_string(),
                budgeted_amount: Decimal::ZERO,
                actual_amount: Decimal::ZERO,
                description: None,
            },
        }
    }

    pub fn amounts(mut self, budgeted: &str, actual: &str) -> Self {
        self.inner.budgeted_amount = dec(budgeted);
        self.inner.actual_amount = dec(actual);
        self
    }

    pub fn week_end(mut self, week_end: NaiveDate) -> Self {
        self.inner.week_end = week_end;
        self
    }

    pub fn build(self) -> NewBudgetEntry {
        self.inner
    }
}

// ==========================================
// NewStockMovement
// ==========================================

pub fn movement(component_id: Uuid, movement_type: MovementType, quantity: i64) -> NewStockMovement {
    NewStockMovement {
        component_id,
        movement_type,
        quantity,
        reference_id: None,
        reference_type: None,
        notes: None,
    }
}
