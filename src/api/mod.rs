// ==========================================
// 病理实验室耗材管理 - API 层
// ==========================================
// 职责: 输入校验与业务门面, 供命令行入口与集成方调用
// ==========================================

pub mod error;
pub mod inventory_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use inventory_api::InventoryApi;
pub use validator::{
    ensure_single_item, validate_demand_records, validate_lot_record, validate_lot_records,
};
