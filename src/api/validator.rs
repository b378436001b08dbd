// ==========================================
// Pentwheel 跟踪服务 - 输入校验器
// ==========================================
// 职责: 写入前的字段校验 (非负/非空/日期顺序) 与分页裁剪
// 约束: 新建与更新共用同一套规则, 更新时校验合并后的完整记录
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::budget::BudgetEntry;
use crate::domain::company::Company;
use crate::domain::component::{Component, NewStockMovement};
use crate::domain::repair::{Repair, RepairComponent};
use crate::domain::returns::Return;
use crate::domain::shipment::Shipment;
use crate::domain::types::MovementType;
use crate::repository::sql_builder::Page;

/// 默认分页上限
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1000;

// ==========================================
// 基础规则
// ==========================================

pub fn require_non_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{} must not be blank", field)));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: i64) -> ApiResult<()> {
    if value < 0 {
        return Err(ApiError::ValidationError(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(())
}

pub fn require_non_negative_decimal(field: &str, value: Decimal) -> ApiResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ApiError::ValidationError(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(())
}

pub fn require_week_order(week_start: NaiveDate, week_end: NaiveDate) -> ApiResult<()> {
    if week_start > week_end {
        return Err(ApiError::ValidationError(format!(
            "week_start ({}) must not be after week_end ({})",
            week_start, week_end
        )));
    }
    Ok(())
}

/// 裁剪分页参数 (默认 skip=0, limit=100, limit 不超过 max_page_size)
pub fn page(skip: Option<u32>, limit: Option<u32>, max_page_size: u32) -> Page {
    Page::new(
        skip.unwrap_or(0),
        limit.unwrap_or(Page::DEFAULT_LIMIT).min(max_page_size),
    )
}

// ==========================================
// Validate - 记录级校验
// ==========================================
pub trait Validate {
    fn validate(&self) -> ApiResult<()>;
}

impl Validate for Company {
    fn validate(&self) -> ApiResult<()> {
        require_non_blank("name", &self.name)
    }
}

impl Validate for Return {
    fn validate(&self) -> ApiResult<()> {
        require_non_blank("return_id", &self.return_id)?;
        require_non_negative("total_items", self.total_items)?;
        require_non_negative_decimal("total_value", self.total_value)
    }
}

impl Validate for Repair {
    fn validate(&self) -> ApiResult<()> {
        require_non_blank("repair_id", &self.repair_id)?;
        require_non_blank("issue_description", &self.issue_description)?;
        require_non_negative_decimal("labor_cost", self.labor_cost)?;
        require_non_negative_decimal("parts_cost", self.parts_cost)
    }
}

impl Validate for Shipment {
    fn validate(&self) -> ApiResult<()> {
        require_non_blank("shipment_id", &self.shipment_id)?;
        require_non_negative("total_units", self.total_units)?;
        if let Some(weight) = self.weight_kg {
            require_non_negative_decimal("weight_kg", weight)?;
        }
        Ok(())
    }
}

impl Validate for Component {
    fn validate(&self) -> ApiResult<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("sku", &self.sku)?;
        require_non_negative_decimal("unit_cost", self.unit_cost)?;
        require_non_negative("minimum_stock", self.minimum_stock)?;
        require_non_negative("current_stock", self.current_stock)?;
        require_non_negative("reorder_level", self.reorder_level)
    }
}

impl Validate for RepairComponent {
    fn validate(&self) -> ApiResult<()> {
        if self.quantity_needed < 1 {
            return Err(ApiError::ValidationError(format!(
                "quantity_needed must be at least 1, got {}",
                self.quantity_needed
            )));
        }
        require_non_negative("quantity_used", self.quantity_used)?;
        require_non_negative_decimal("cost_per_unit", self.cost_per_unit)
    }
}

impl Validate for NewStockMovement {
    fn validate(&self) -> ApiResult<()> {
        // adjustment 允许负数
        if self.movement_type != MovementType::Adjustment {
            require_non_negative("quantity", self.quantity)?;
        }
        Ok(())
    }
}

impl Validate for BudgetEntry {
    fn validate(&self) -> ApiResult<()> {
        require_non_blank("category", &self.category)?;
        require_non_negative_decimal("budgeted_amount", self.budgeted_amount)?;
        require_non_negative_decimal("actual_amount", self.actual_amount)?;
        require_week_order(self.week_start, self.week_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::NewBudgetEntry;
    use crate::domain::company::NewCompany;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_blank_name_rejected() {
        let company = Company::from_new(
            NewCompany {
                name: "   ".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(matches!(
            company.validate(),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn test_budget_week_order() {
        let entry = BudgetEntry::from_new(
            NewBudgetEntry {
                week_start: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                week_end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                category: "parts".to_string(),
                budgeted_amount: Decimal::ONE,
                actual_amount: Decimal::ZERO,
                description: None,
            },
            Utc::now(),
        );
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_negative_decimal_rejected_but_negative_zero_allowed() {
        assert!(require_non_negative_decimal("labor_cost", Decimal::new(-1, 2)).is_err());
        assert!(require_non_negative_decimal("labor_cost", Decimal::new(0, 2)).is_ok());
        let mut negative_zero = Decimal::ZERO;
        negative_zero.set_sign_negative(true);
        assert!(require_non_negative_decimal("labor_cost", negative_zero).is_ok());
    }

    #[test]
    fn test_movement_sign_rules() {
        let mut movement = NewStockMovement {
            component_id: Uuid::new_v4(),
            movement_type: MovementType::Out,
            quantity: -3,
            reference_id: None,
            reference_type: None,
            notes: None,
        };
        assert!(movement.validate().is_err());

        movement.movement_type = MovementType::Adjustment;
        assert!(movement.validate().is_ok());
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(page(None, None, 1000), Page::new(0, 100));
        assert_eq!(page(Some(5), Some(5000), 1000), Page::new(5, 1000));
        assert_eq!(page(None, Some(20), 10), Page::new(0, 10));
    }
}
