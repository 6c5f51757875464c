// ==========================================
// 病理实验室耗材管理 - 库存 API
// ==========================================
// 职责: 批次登记、逐耗材规划、检索排序与报表
// 红线: 输入先校验后进入引擎; 每个耗材只借出自己的批次切片
// ==========================================

use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{ensure_single_item, validate_demand_records, validate_lot_records};
use crate::config::PlannerConfig;
use crate::domain::demand::DemandRecord;
use crate::domain::lot::{Lot, LotRecord};
use crate::domain::plan::Plan;
use crate::domain::registry::LotRegistry;
use crate::engine::allocation::AllocationPlanner;
use crate::engine::consumption_log::ConsumptionLog;
use crate::engine::lot_index::sequential_search_by_name;
use crate::engine::lot_sorter::LotSorter;
use crate::engine::report::{PlanningReport, ReportBuilder};
use crate::perf::PerfGuard;

// ==========================================
// InventoryApi - 库存 API
// ==========================================

/// 库存API
///
/// 职责：
/// 1. 校验并登记批次
/// 2. 按耗材运行分配规划, 逐日写入消耗日志
/// 3. 批次检索与效期排序
/// 4. 生成规划报表
pub struct InventoryApi {
    config: PlannerConfig,
    planner: AllocationPlanner,
    sorter: LotSorter,
    registry: LotRegistry,
    log: ConsumptionLog,
    planning_elapsed: Duration,
}

impl InventoryApi {
    pub fn new(config: PlannerConfig) -> Self {
        let planner = AllocationPlanner::new(&config);
        Self {
            config,
            planner,
            sorter: LotSorter::new(),
            registry: LotRegistry::new(),
            log: ConsumptionLog::new(),
            planning_elapsed: Duration::ZERO,
        }
    }

    /// 校验并登记批次
    ///
    /// # 返回
    /// 登记成功的批次数量
    ///
    /// # 错误
    /// - InvalidLot: 字段非法（含单位体积超过 max_volume_levels）
    /// - DuplicateLot: 批次号在本批或已登记批次中重复
    pub fn register_lots(&mut self, records: &[LotRecord]) -> ApiResult<usize> {
        let lots = validate_lot_records(records, self.config.max_volume_levels)?;
        if let Some(dup) = lots.iter().find(|lot| self.registry.contains_lot(&lot.lot_id)) {
            return Err(ApiError::DuplicateLot(dup.lot_id.clone()));
        }

        let count = lots.len();
        for lot in lots {
            self.registry.register(lot);
        }
        debug!(count, total = self.registry.len(), "批次登记完成");
        Ok(count)
    }

    /// 规划单个耗材
    ///
    /// 逐日结果按顺序写入消耗日志; 需求无法满足不视为错误。
    #[instrument(skip(self, demand), fields(days = demand.len()))]
    pub fn plan_item(&mut self, item_name: &str, demand: &[DemandRecord]) -> ApiResult<Plan> {
        let schedule = validate_demand_records(item_name, demand, self.config.max_volume_levels)?;
        let lots = self.registry.lots_for_mut(item_name);
        ensure_single_item(item_name, lots)?;

        let perf = PerfGuard::new("plan_item");
        let plan = self.planner.plan(lots, &schedule);
        self.planning_elapsed += perf.elapsed();
        drop(perf);

        self.log.record_plan(&plan);
        Ok(plan)
    }

    /// 依次规划多个耗材
    pub fn plan_schedules(&mut self, schedules: &[(String, Vec<DemandRecord>)]) -> ApiResult<Vec<Plan>> {
        let perf = PerfGuard::new("plan_schedules");
        let mut plans = Vec::with_capacity(schedules.len());
        for (item_name, demand) in schedules {
            plans.push(self.plan_item(item_name, demand)?);
        }

        info!(
            items = plans.len(),
            total_cost = plans.iter().map(Plan::total_cost).sum::<f64>(),
            elapsed_ms = perf.elapsed_ms(),
            "多耗材规划完成"
        );
        Ok(plans)
    }

    // ==========================================
    // 检索与排序
    // ==========================================

    /// 按名称模糊检索（顺序查找）
    pub fn search_by_name(&self, name: &str) -> Vec<Lot> {
        let lots = self.registry.snapshot();
        sequential_search_by_name(&lots, name).into_iter().cloned().collect()
    }

    /// 按批次号检索
    pub fn find_lot(&self, lot_id: &str) -> Option<&Lot> {
        self.registry.iter().find(|lot| lot.lot_id == lot_id)
    }

    /// 全部批次按效期升序
    pub fn lots_by_expiry(&self) -> Vec<Lot> {
        self.sorter.sort_by_expiry(&self.registry.snapshot())
    }

    // ==========================================
    // 访问器
    // ==========================================

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn registry(&self) -> &LotRegistry {
        &self.registry
    }

    pub fn consumption_log(&self) -> &ConsumptionLog {
        &self.log
    }

    /// 累计规划耗时（仅 DP 求解部分）
    pub fn planning_elapsed(&self) -> Duration {
        self.planning_elapsed
    }

    pub fn build_report(&self) -> PlanningReport {
        ReportBuilder::new().build(&self.log, &self.registry, self.planning_elapsed)
    }
}

impl Default for InventoryApi {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
