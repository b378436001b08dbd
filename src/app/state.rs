// ==========================================
// Pentwheel 跟踪服务 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 所有仓储共享同一个显式传入的连接句柄
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::validator::DEFAULT_MAX_PAGE_SIZE;
use crate::api::{
    AnalyticsApi, BudgetApi, CompanyApi, InventoryApi, RepairApi, ReturnApi, ShipmentApi,
};
use crate::db::{self, SchemaError};
use crate::repository::{
    AnalyticsRepository, BudgetRepository, CompanyRepository, ComponentRepository,
    RepairComponentRepository, RepairRepository, ReturnRepository, ShipmentRepository,
    StockMovementRepository,
};

/// 应用状态
///
/// 包含所有API实例, 作为 axum 路由的共享状态
#[derive(Clone)]
pub struct AppState {
    /// 列表接口的 limit 上限
    pub max_page_size: u32,

    pub company_api: Arc<CompanyApi>,
    pub return_api: Arc<ReturnApi>,
    pub repair_api: Arc<RepairApi>,
    pub shipment_api: Arc<ShipmentApi>,
    pub inventory_api: Arc<InventoryApi>,
    pub budget_api: Arc<BudgetApi>,
    pub analytics_api: Arc<AnalyticsApi>,
}

impl AppState {
    /// 打开数据库文件、建表并装配全部 API
    pub fn open(db_path: &str, max_page_size: u32) -> Result<Self, SchemaError> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = db::open_sqlite_connection(db_path)?;
        db::init_schema(&conn)?;
        Ok(Self::from_connection(conn, max_page_size))
    }

    /// 基于已配置好的连接装配
    ///
    /// 该方法会：
    /// 1. 初始化所有Repository
    /// 2. 创建所有API实例
    pub fn from_connection(conn: Connection, max_page_size: u32) -> Self {
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let company_repo = Arc::new(CompanyRepository::new(conn.clone()));
        let return_repo = Arc::new(ReturnRepository::new(conn.clone()));
        let repair_repo = Arc::new(RepairRepository::new(conn.clone()));
        let link_repo = Arc::new(RepairComponentRepository::new(conn.clone()));
        let shipment_repo = Arc::new(ShipmentRepository::new(conn.clone()));
        let component_repo = Arc::new(ComponentRepository::new(conn.clone()));
        let movement_repo = Arc::new(StockMovementRepository::new(conn.clone()));
        let budget_repo = Arc::new(BudgetRepository::new(conn.clone()));
        let analytics_repo = Arc::new(AnalyticsRepository::new(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        Self {
            max_page_size,
            company_api: Arc::new(CompanyApi::new(company_repo.clone())),
            return_api: Arc::new(ReturnApi::new(return_repo, company_repo)),
            repair_api: Arc::new(RepairApi::new(
                repair_repo,
                link_repo,
                component_repo.clone(),
            )),
            shipment_api: Arc::new(ShipmentApi::new(shipment_repo)),
            inventory_api: Arc::new(InventoryApi::new(component_repo, movement_repo)),
            budget_api: Arc::new(BudgetApi::new(budget_repo.clone())),
            analytics_api: Arc::new(AnalyticsApi::new(analytics_repo, budget_repo)),
        }
    }

    /// 内存数据库 (测试用)
    pub fn in_memory() -> Result<Self, SchemaError> {
        Ok(Self::from_connection(
            db::open_in_memory()?,
            DEFAULT_MAX_PAGE_SIZE,
        ))
    }
}
