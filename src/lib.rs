// ==========================================
// 病理实验室耗材管理 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 批次分配规划（成本最小化, 效期与浪费惩罚）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 规划、检索、排序、报表
pub mod engine;

// 配置层 - 规划参数
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ExpiryRiskLevel, LotOrderPolicy};

// 领域实体
pub use domain::{
    AllocationChoice, ConsumptionRecord, DayPlan, DemandDay, DemandRecord, DemandSchedule, Lot,
    LotDraw, LotRecord, LotRegistry, Plan,
};

// 引擎
pub use engine::{
    AllocationPlanner, ConsumptionLog, LotIndex, LotSorter, PenaltyModel, PlanningReport,
    ReportBuilder,
};

// 配置
pub use config::{ConfigError, ConfigManager, PlannerConfig};

// API
pub use api::{ApiError, ApiResult, InventoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "病理实验室耗材批次规划";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
