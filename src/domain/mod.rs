// ==========================================
// 病理实验室耗材管理 - 领域模型层
// ==========================================
// 职责: 定义批次、需求、分配方案、消耗记录
// 红线: 不含规划逻辑, 不含 I/O
// ==========================================

pub mod consumption;
pub mod demand;
pub mod lot;
pub mod plan;
pub mod registry;
pub mod types;

// 重导出核心类型
pub use consumption::ConsumptionRecord;
pub use demand::{DemandDay, DemandRecord, DemandSchedule};
pub use lot::{Lot, LotRecord};
pub use plan::{AllocationChoice, DayPlan, LotDraw, Plan};
pub use registry::LotRegistry;
pub use types::{ExpiryRiskLevel, LotOrderPolicy};
