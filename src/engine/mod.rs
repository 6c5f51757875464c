// ==========================================
// 病理实验室耗材管理 - 引擎层
// ==========================================
// 职责: 批次分配规划、检索、排序、消耗日志与报表
// 红线: 引擎不做输入校验, 校验在 API 层完成
// ==========================================

pub mod allocation;
pub mod consumption_log;
pub mod generator;
pub mod lot_index;
pub mod lot_sorter;
pub mod report;

// 重导出核心引擎
pub use allocation::{AllocationPlanner, DaySolution, PenaltyModel};
pub use consumption_log::{ConsumptionLog, FifoCursor, LifoCursor};
pub use lot_index::{sequential_search_by_id, sequential_search_by_name, LotIndex};
pub use lot_sorter::{merge_sort_by, quick_sort_by, LotSorter};
pub use report::{FulfillmentSummary, ItemConsumption, LotSnapshot, PlanningReport, ReportBuilder};
