// ==========================================
// 病理实验室耗材管理 - 消耗记录领域模型
// ==========================================
// 用途: 按时间顺序记录每日规划结果, 供队列/栈视图回放
// ==========================================

use crate::domain::plan::{DayPlan, LotDraw};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub sequence_no: u64,          // 写入顺序号（从 1 开始）
    pub item_name: String,         // 耗材名称
    pub day_index: u32,            // 第几天
    pub demand: u64,               // 需求体积
    pub fulfilled: bool,           // 是否满足
    pub committed: bool,           // 是否已扣减库存
    pub drawn_volume: u64,         // 取用体积
    pub cost: f64,                 // 有效成本
    pub draws: Vec<LotDraw>,       // 批次取用明细
    pub recorded_at: NaiveDateTime, // 记录时间
}

impl ConsumptionRecord {
    pub fn from_day_plan(
        sequence_no: u64,
        item_name: &str,
        day: &DayPlan,
        recorded_at: NaiveDateTime,
    ) -> Self {
        Self {
            sequence_no,
            item_name: item_name.to_string(),
            day_index: day.day_index,
            demand: day.demand,
            fulfilled: day.fulfilled,
            committed: day.committed,
            drawn_volume: day.drawn_volume,
            cost: day.cost,
            draws: day.choices.draws.clone(),
            recorded_at,
        }
    }

    /// 实际消耗体积（未扣减库存的尝试不计入）
    pub fn consumed_volume(&self) -> u64 {
        if self.committed {
            self.drawn_volume
        } else {
            0
        }
    }
}
