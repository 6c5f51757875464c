// ==========================================
// 病理实验室耗材管理 - 批次分配规划引擎
// ==========================================
// 红线: 库存只减不增, 单次规划独占单耗材的批次切片
// 红线: 平局取向由 LotOrderPolicy 显式决定
// ==========================================
// 职责: 逐日 DP 选择批次组合, 最小化 基础成本 + 效期惩罚 + 浪费惩罚
// 输入: &mut [Lot] + DemandSchedule
// 输出: Plan
// ==========================================

mod planner;
mod penalty;


pub use planner::{AllocationPlanner, DaySolution};
pub use penalty::PenaltyModel;
