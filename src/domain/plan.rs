// ==========================================
// 病理实验室耗材管理 - 分配方案领域模型
// ==========================================
// 红线: DayPlan 严格按天追加, 与批次库存扣减同步
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// LotDraw - 单批次取用明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotDraw {
    pub lot_id: String,      // 批次号
    pub units: u32,          // 取用单位数 (>= 1)
    pub volume: u64,         // 取用体积 = units * unit_volume
    pub base_cost: f64,      // 基础成本 = units * unit_cost
    pub expiry_penalty: f64, // 效期风险惩罚
}

// ==========================================
// AllocationChoice - 单日批次组合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationChoice {
    pub draws: Vec<LotDraw>,
}

impl AllocationChoice {
    pub fn new(draws: Vec<LotDraw>) -> Self {
        Self { draws }
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LotDraw> {
        self.draws.iter()
    }

    pub fn total_units(&self) -> u64 {
        self.draws.iter().map(|d| u64::from(d.units)).sum()
    }

    pub fn total_volume(&self) -> u64 {
        self.draws.iter().map(|d| d.volume).sum()
    }

    /// 指定批次的取用单位数（未取用返回 0）
    pub fn units_for(&self, lot_id: &str) -> u32 {
        self.draws
            .iter()
            .filter(|d| d.lot_id == lot_id)
            .map(|d| d.units)
            .sum()
    }

    /// (lot_id, units) 列表
    pub fn as_pairs(&self) -> Vec<(String, u32)> {
        self.draws
            .iter()
            .map(|d| (d.lot_id.clone(), d.units))
            .collect()
    }
}

// ==========================================
// DayPlan - 单日规划结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day_index: u32,
    pub demand: u64,
    pub fulfilled: bool,        // 需求是否完全满足
    pub committed: bool,        // 取用是否已扣减库存
    pub drawn_volume: u64,      // 取用总体积
    pub waste_volume: u64,      // 超出需求的体积

    // ===== 成本拆分 (cost = base_cost + expiry_penalty + waste_penalty) =====
    pub base_cost: f64,
    pub expiry_penalty: f64,
    pub waste_penalty: f64,
    pub cost: f64,

    pub choices: AllocationChoice,
}

impl DayPlan {
    /// 零成本、无取用的单日结果
    pub fn empty(day_index: u32, demand: u64, fulfilled: bool) -> Self {
        Self {
            day_index,
            demand,
            fulfilled,
            committed: false,
            drawn_volume: 0,
            waste_volume: 0,
            base_cost: 0.0,
            expiry_penalty: 0.0,
            waste_penalty: 0.0,
            cost: 0.0,
            choices: AllocationChoice::default(),
        }
    }

    /// 未满足的缺口体积
    pub fn shortfall(&self) -> u64 {
        self.demand.saturating_sub(self.drawn_volume)
    }
}

// ==========================================
// Plan - 单耗材规划方案
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub item_name: String,
    pub days: Vec<DayPlan>,
}

impl Plan {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            days: Vec::new(),
        }
    }

    /// 追加单日结果（按需求计划顺序）
    pub fn push(&mut self, day: DayPlan) {
        self.days.push(day);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.days.iter().map(|d| d.cost).sum()
    }

    pub fn fulfilled_days(&self) -> usize {
        self.days.iter().filter(|d| d.fulfilled).count()
    }

    pub fn unfulfilled_days(&self) -> usize {
        self.days.len() - self.fulfilled_days()
    }

    /// 已扣减库存的取用总体积
    pub fn committed_volume(&self) -> u64 {
        self.days
            .iter()
            .filter(|d| d.committed)
            .map(|d| d.drawn_volume)
            .sum()
    }
}
