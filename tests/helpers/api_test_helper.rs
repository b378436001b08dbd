// ==========================================
// API 集成测试环境
// ==========================================
// 每个测试一份独立的临时数据库文件
// ==========================================

use std::sync::Arc;

use pentwheel_api::api::validator::DEFAULT_MAX_PAGE_SIZE;
use pentwheel_api::api::{
    AnalyticsApi, BudgetApi, CompanyApi, InventoryApi, RepairApi, ReturnApi, ShipmentApi,
};
use pentwheel_api::app::AppState;
use tempfile::NamedTempFile;

use crate::test_helpers;

pub struct ApiTestEnv {
    pub company_api: Arc<CompanyApi>,
    pub return_api: Arc<ReturnApi>,
    pub repair_api: Arc<RepairApi>,
    pub shipment_api: Arc<ShipmentApi>,
    pub inventory_api: Arc<InventoryApi>,
    pub budget_api: Arc<BudgetApi>,
    pub analytics_api: Arc<AnalyticsApi>,

    /// 同一数据库上的完整应用状态 (供路由测试使用)
    pub state: AppState,
    pub db_path: String,

    // 保持临时文件存活
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    pub fn new() -> Result<Self, String> {
        pentwheel_api::logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let state = AppState::open(&db_path, DEFAULT_MAX_PAGE_SIZE)
            .map_err(|e| format!("无法初始化AppState: {}", e))?;

        Ok(Self {
            company_api: state.company_api.clone(),
            return_api: state.return_api.clone(),
            repair_api: state.repair_api.clone(),
            shipment_api: state.shipment_api.clone(),
            inventory_api: state.inventory_api.clone(),
            budget_api: state.budget_api.clone(),
            analytics_api: state.analytics_api.clone(),
            state,
            db_path,
            _temp_file: temp_file,
        })
    }
}
