// ==========================================
// 病理实验室耗材管理 - 批次分配规划引擎
// ==========================================
// 红线: 逐日顺序求解, 当日取用立即扣减库存, 后续日期只看剩余库存
// 红线: 需求无法满足不是错误, 只是 fulfilled=false 的正常结果
// ==========================================
// 职责: 单耗材多日需求的批次选择（有界数量覆盖 DP）
// 输入: 单耗材批次可变切片 + 逐日需求
// 输出: Plan（逐日结果） + 批次 stock 扣减
// ==========================================

use super::penalty::PenaltyModel;
use crate::config::PlannerConfig;
use crate::domain::demand::{DemandDay, DemandSchedule};
use crate::domain::lot::Lot;
use crate::domain::plan::{AllocationChoice, DayPlan, LotDraw, Plan};
use crate::domain::types::LotOrderPolicy;
use std::collections::VecDeque;
use tracing::{debug, info, instrument, warn};

/// 成本比较容差（浮点累加误差内视为相等）
const COST_EPSILON: f64 = 1e-9;

// ==========================================
// DaySolution - 单日求解结果（未扣减库存）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct DaySolution {
    pub demand: u64,
    pub fulfilled: bool,
    /// (批次在切片中的下标, 取用单位数)，按批次排序策略顺序
    pub picks: Vec<(usize, u32)>,
    pub drawn_volume: u64,
    pub base_cost: f64,
    pub expiry_penalty: f64,
    pub waste_penalty: f64,
    pub cost: f64,
}

impl DaySolution {
    fn empty(demand: u64, fulfilled: bool) -> Self {
        Self {
            demand,
            fulfilled,
            picks: Vec::new(),
            drawn_volume: 0,
            base_cost: 0.0,
            expiry_penalty: 0.0,
            waste_penalty: 0.0,
            cost: 0.0,
        }
    }

    /// (lot_id, 单位数) 列表
    pub fn units_by_lot<'a>(&self, lots: &'a [Lot]) -> Vec<(&'a str, u32)> {
        self.picks
            .iter()
            .map(|&(index, units)| (lots[index].lot_id.as_str(), units))
            .collect()
    }
}

// ==========================================
// AllocationPlanner - 批次分配规划引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct AllocationPlanner {
    penalty: PenaltyModel,
    lot_order: LotOrderPolicy,
    commit_partial_draws: bool,
}

impl AllocationPlanner {
    /// 按配置构造
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            penalty: PenaltyModel::from_config(config),
            lot_order: config.lot_order,
            commit_partial_draws: config.commit_partial_draws,
        }
    }

    pub fn penalty(&self) -> &PenaltyModel {
        &self.penalty
    }

    pub fn lot_order(&self) -> LotOrderPolicy {
        self.lot_order
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 规划单耗材的整个需求计划
    ///
    /// 按 `schedule.days` 顺序逐日求解，每日取用立即从 `lots` 扣减，
    /// 因此后续日期只能使用剩余库存。
    ///
    /// # 参数
    /// - `lots`: 同一耗材的全部批次（会被修改）
    /// - `schedule`: 逐日需求
    ///
    /// # 返回
    /// 与 `schedule.days` 一一对应的 Plan
    #[instrument(skip(self, lots, schedule), fields(
        item = %schedule.item_name,
        days = schedule.len(),
        lots = lots.len(),
        lot_order = %self.lot_order
    ))]
    pub fn plan(&self, lots: &mut [Lot], schedule: &DemandSchedule) -> Plan {
        let mut plan = Plan::new(schedule.item_name.clone());
        for day in &schedule.days {
            let day_plan = self.plan_day(lots, day);
            plan.push(day_plan);
        }

        info!(
            fulfilled_days = plan.fulfilled_days(),
            unfulfilled_days = plan.unfulfilled_days(),
            total_cost = plan.total_cost(),
            committed_volume = plan.committed_volume(),
            "耗材规划完成"
        );
        plan
    }

    /// 规划单日并扣减库存
    pub fn plan_day(&self, lots: &mut [Lot], day: &DemandDay) -> DayPlan {
        let solution = self.solve_day(lots, day.quantity);

        if solution.picks.is_empty() {
            if !solution.fulfilled {
                warn!(day = day.day_index, demand = day.quantity, "无可用库存, 当日需求未满足");
            }
            return DayPlan::empty(day.day_index, day.quantity, solution.fulfilled);
        }

        let draws: Vec<LotDraw> = solution
            .picks
            .iter()
            .map(|&(index, units)| {
                let lot = &lots[index];
                LotDraw {
                    lot_id: lot.lot_id.clone(),
                    units,
                    volume: u64::from(units) * u64::from(lot.unit_volume),
                    base_cost: f64::from(units) * lot.unit_cost,
                    expiry_penalty: self.penalty.expiry_penalty(lot, units),
                }
            })
            .collect();

        let committed = solution.fulfilled || self.commit_partial_draws;
        if committed {
            for &(index, units) in &solution.picks {
                lots[index].draw(units);
            }
        }

        if solution.fulfilled {
            debug!(
                day = day.day_index,
                demand = day.quantity,
                drawn_volume = solution.drawn_volume,
                cost = solution.cost,
                lots_used = draws.len(),
                "当日需求已满足"
            );
        } else {
            warn!(
                day = day.day_index,
                demand = day.quantity,
                drawn_volume = solution.drawn_volume,
                committed,
                "库存不足, 当日需求仅部分满足"
            );
        }

        DayPlan {
            day_index: day.day_index,
            demand: day.quantity,
            fulfilled: solution.fulfilled,
            committed,
            drawn_volume: solution.drawn_volume,
            waste_volume: solution.drawn_volume.saturating_sub(day.quantity),
            base_cost: solution.base_cost,
            expiry_penalty: solution.expiry_penalty,
            waste_penalty: solution.waste_penalty,
            cost: solution.cost,
            choices: AllocationChoice::new(draws),
        }
    }

    /// 单日最小成本组合求解（不修改库存）
    ///
    /// 有界数量覆盖 DP：`best[v]` 为恰好取到体积 v 的最小有效成本。
    /// - 批次按 `lot_order` 依次展开，每个批次可取 0..=stock 个单位
    /// - 按 `v mod unit_volume` 分组，组内用单调队列维护长度为 stock 的滑动窗口最小值，
    ///   每个批次 O(cap)
    /// - 同一体积成本相同时，保留后序批次取用更少的组合（平局偏向排序靠前的批次）
    /// - 体积上限为 min(总可用体积, demand + 最大单位体积 - 1)：
    ///   超过该上限的组合必含可移除的单位，移除后成本不增
    /// - 选取 v >= demand 中 `best[v] + 浪费惩罚` 最小者（相同取较小 v）；
    ///   若不存在，取可达的最大体积
    pub fn solve_day(&self, lots: &[Lot], demand: u64) -> DaySolution {
        if demand == 0 {
            return DaySolution::empty(demand, true);
        }

        let mut order: Vec<usize> = (0..lots.len())
            .filter(|&i| lots[i].is_available() && lots[i].unit_volume > 0)
            .collect();
        if order.is_empty() {
            return DaySolution::empty(demand, false);
        }
        order.sort_by(|&a, &b| self.lot_order.compare(&lots[a], &lots[b]));

        let total_volume = order
            .iter()
            .fold(0u64, |acc, &i| acc.saturating_add(lots[i].available_volume()));
        let max_unit_volume = order
            .iter()
            .map(|&i| u64::from(lots[i].unit_volume))
            .max()
            .unwrap_or(0);
        let cap_volume = total_volume.min(demand.saturating_add(max_unit_volume.saturating_sub(1)));
        let cap = cap_volume as usize;

        // ===== 1. 逐批次展开可达体积 =====
        let mut best = vec![f64::INFINITY; cap + 1];
        best[0] = 0.0;
        let mut takes: Vec<Vec<u32>> = Vec::with_capacity(order.len());

        for &index in &order {
            let lot = &lots[index];
            let unit_volume = lot.unit_volume as usize;
            let unit_cost = self.penalty.effective_unit_cost(lot);

            let mut next = vec![f64::INFINITY; cap + 1];
            let mut take = vec![0u32; cap + 1];
            let stock = lot.stock as usize;

            // 体积 level = residue + position * unit_volume
            // 从 position' 取 (position - position') 个单位的代价为
            //   best[.. position'] - position' * c + position * c
            // 队列按 position 递增、值严格递增保存候选；相等时保留较新的（取用更少）
            let mut window: VecDeque<(usize, f64)> = VecDeque::new();
            for residue in 0..unit_volume.min(cap + 1) {
                window.clear();
                let mut position = 0usize;
                let mut level = residue;
                while level <= cap {
                    let prev = best[level];
                    if prev.is_finite() {
                        let value = prev - position as f64 * unit_cost;
                        while window
                            .back()
                            .is_some_and(|&(_, v)| v >= value - COST_EPSILON)
                        {
                            window.pop_back();
                        }
                        window.push_back((position, value));
                    }
                    while window.front().is_some_and(|&(from, _)| from + stock < position) {
                        window.pop_front();
                    }
                    if let Some(&(from, value)) = window.front() {
                        next[level] = value + position as f64 * unit_cost;
                        take[level] = (position - from) as u32;
                    }

                    position += 1;
                    level += unit_volume;
                }
            }

            best = next;
            takes.push(take);
        }

        // ===== 2. 选取目标体积 =====
        let mut chosen: Option<(usize, f64)> = None;
        if demand <= cap_volume {
            for level in demand as usize..=cap {
                if !best[level].is_finite() {
                    continue;
                }
                let total = best[level] + self.penalty.waste_penalty(level as u64, demand);
                if chosen.map_or(true, |(_, c)| total < c - COST_EPSILON) {
                    chosen = Some((level, total));
                }
            }
        }

        let (level, fulfilled) = match chosen {
            Some((level, _)) => (level, true),
            None => {
                let reachable = (0..=cap).rev().find(|&l| best[l].is_finite()).unwrap_or(0);
                (reachable, false)
            }
        };

        // ===== 3. 回溯各批次取用数量 =====
        let mut picks = Vec::new();
        let mut remaining = level;
        for (position, &index) in order.iter().enumerate().rev() {
            let units = takes[position][remaining];
            remaining -= units as usize * lots[index].unit_volume as usize;
            if units > 0 {
                picks.push((index, units));
            }
        }
        picks.reverse();
        debug_assert_eq!(remaining, 0);

        // ===== 4. 成本拆分 =====
        let mut drawn_volume = 0u64;
        let mut base_cost = 0.0;
        let mut expiry_penalty = 0.0;
        for &(index, units) in &picks {
            let lot = &lots[index];
            drawn_volume += u64::from(units) * u64::from(lot.unit_volume);
            base_cost += f64::from(units) * lot.unit_cost;
            expiry_penalty += self.penalty.expiry_penalty(lot, units);
        }
        let waste_penalty = self.penalty.waste_penalty(drawn_volume, demand);

        DaySolution {
            demand,
            fulfilled,
            picks,
            drawn_volume,
            base_cost,
            expiry_penalty,
            waste_penalty,
            cost: base_cost + expiry_penalty + waste_penalty,
        }
    }
}

impl Default for AllocationPlanner {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}
