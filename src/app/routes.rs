// ==========================================
// Pentwheel 跟踪服务 - 路由表
// ==========================================

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app::handlers::{analytics, budget, companies, inventory, repairs, returns, shipments};
use crate::app::state::AppState;

/// 构建完整路由 (含请求追踪层)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(analytics::health))
        // 公司
        .route(
            "/companies/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/:id",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        // 退货
        .route(
            "/returns/",
            get(returns::list_returns).post(returns::create_return),
        )
        .route(
            "/returns/:id",
            get(returns::get_return)
                .put(returns::update_return)
                .delete(returns::delete_return),
        )
        // 维修单
        .route(
            "/repairs/",
            get(repairs::list_repairs).post(repairs::create_repair),
        )
        .route(
            "/repairs/:id",
            get(repairs::get_repair)
                .put(repairs::update_repair)
                .delete(repairs::delete_repair),
        )
        // 发运
        .route(
            "/shipments/",
            get(shipments::list_shipments).post(shipments::create_shipment),
        )
        .route(
            "/shipments/:id",
            get(shipments::get_shipment)
                .put(shipments::update_shipment)
                .delete(shipments::delete_shipment),
        )
        // 零部件
        .route(
            "/components/",
            get(inventory::list_components).post(inventory::create_component),
        )
        .route("/components/sku/:sku", get(inventory::get_component_by_sku))
        .route(
            "/components/:id",
            get(inventory::get_component)
                .put(inventory::update_component)
                .delete(inventory::delete_component),
        )
        // 维修用料
        .route(
            "/repair-components/",
            get(repairs::list_repair_components).post(repairs::create_repair_component),
        )
        .route(
            "/repair-components/:id",
            get(repairs::get_repair_component)
                .put(repairs::update_repair_component)
                .delete(repairs::delete_repair_component),
        )
        // 库存变动
        .route(
            "/stock-movements/",
            get(inventory::list_stock_movements).post(inventory::create_stock_movement),
        )
        .route("/stock-movements/:id", get(inventory::get_stock_movement))
        // 周预算
        .route(
            "/budget-entries/",
            get(budget::list_budget_entries).post(budget::create_budget_entry),
        )
        .route(
            "/budget-entries/:id",
            get(budget::get_budget_entry)
                .put(budget::update_budget_entry)
                .delete(budget::delete_budget_entry),
        )
        // 统计报表
        .route(
            "/analytics/repairs/status-summary",
            get(analytics::repair_status_summary),
        )
        .route(
            "/analytics/repairs/priority-summary",
            get(analytics::repair_priority_summary),
        )
        .route(
            "/analytics/components/low-stock",
            get(analytics::low_stock_components),
        )
        .route(
            "/analytics/shipments/status-summary",
            get(analytics::shipment_status_summary),
        )
        .route(
            "/analytics/budget/weekly-summary",
            get(analytics::weekly_budget_summary),
        )
        .route("/analytics/dashboard", get(analytics::dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
