// ==========================================
// 病理实验室耗材管理 - 规划报表
// ==========================================
// 职责: 汇总消耗日志与批次剩余库存
// 输入: ConsumptionLog + LotRegistry + 规划耗时
// 输出: PlanningReport（文本 / JSON）
// ==========================================

use crate::domain::registry::LotRegistry;
use crate::domain::types::ExpiryRiskLevel;
use crate::engine::consumption_log::ConsumptionLog;
use crate::engine::lot_sorter::LotSorter;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;
use uuid::Uuid;

/// 满足率汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentSummary {
    pub planned_days: usize,
    pub fulfilled_days: usize,
    pub unfulfilled_days: usize,
    pub total_demand: u64,
    pub total_consumed_volume: u64,
    pub total_cost: f64,
    pub fulfillment_rate: f64, // 0.0 - 1.0
}

/// 单耗材消耗量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConsumption {
    pub item_name: String,
    pub consumed_volume: u64,
}

/// 批次快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSnapshot {
    pub lot_id: String,
    pub item_name: String,
    pub stock: u32,
    pub initial_stock: u32,
    pub expiry_days: u32,
    pub risk_level: ExpiryRiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningReport {
    pub run_id: Uuid,
    pub generated_at: NaiveDateTime,
    pub planning_elapsed_ms: f64,
    pub fulfillment: FulfillmentSummary,
    pub consumption_ranking: Vec<ItemConsumption>, // 消耗量降序
    pub urgent_lots: Vec<LotSnapshot>,             // 有库存批次, 效期升序
    pub remaining_stock: Vec<LotSnapshot>,         // 全部批次
}

impl PlanningReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 文本报表
    pub fn render_text(&self, top_n: usize) -> String {
        let mut out = String::new();
        let f = &self.fulfillment;

        let _ = writeln!(out, "📊 规划报表 (run_id={})", self.run_id);
        let _ = writeln!(out, "{}", "-".repeat(40));
        let _ = writeln!(out, "规划耗时 (DP): {:.4}s", self.planning_elapsed_ms / 1000.0);
        let _ = writeln!(
            out,
            "规划天数: {} | 满足: {} | 未满足: {} | 满足率: {:.1}%",
            f.planned_days,
            f.fulfilled_days,
            f.unfulfilled_days,
            f.fulfillment_rate * 100.0
        );
        let _ = writeln!(
            out,
            "总需求体积: {} | 实际消耗体积: {} | 总成本: {:.2}",
            f.total_demand, f.total_consumed_volume, f.total_cost
        );

        let _ = writeln!(out, "耗材消耗排名 (降序):");
        if self.consumption_ranking.is_empty() {
            let _ = writeln!(out, "  (无消耗记录)");
        }
        for entry in self.consumption_ranking.iter().take(top_n) {
            let _ = writeln!(out, "  - {}: {} 单位体积", entry.item_name, entry.consumed_volume);
        }

        let _ = writeln!(out, "最临期批次:");
        for lot in self.urgent_lots.iter().take(top_n) {
            let _ = writeln!(
                out,
                "  - {} | 批次 {} | 库存={}/{} | 效期={}天 | 风险={}",
                lot.item_name, lot.lot_id, lot.stock, lot.initial_stock, lot.expiry_days, lot.risk_level
            );
        }
        out
    }
}

// ==========================================
// ReportBuilder - 报表构建器
// ==========================================
pub struct ReportBuilder {
    sorter: LotSorter,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            sorter: LotSorter::new(),
        }
    }

    pub fn build(
        &self,
        log: &ConsumptionLog,
        registry: &LotRegistry,
        planning_elapsed: Duration,
    ) -> PlanningReport {
        // 1. 满足率
        let mut fulfillment = FulfillmentSummary {
            planned_days: log.len(),
            fulfilled_days: 0,
            unfulfilled_days: 0,
            total_demand: 0,
            total_consumed_volume: 0,
            total_cost: 0.0,
            fulfillment_rate: 0.0,
        };
        let mut consumed_by_item: BTreeMap<&str, u64> = BTreeMap::new();
        for record in log.fifo() {
            if record.fulfilled {
                fulfillment.fulfilled_days += 1;
            } else {
                fulfillment.unfulfilled_days += 1;
            }
            fulfillment.total_demand += record.demand;
            fulfillment.total_consumed_volume += record.consumed_volume();
            fulfillment.total_cost += record.cost;
            *consumed_by_item.entry(record.item_name.as_str()).or_default() += record.consumed_volume();
        }
        if fulfillment.planned_days > 0 {
            fulfillment.fulfillment_rate =
                fulfillment.fulfilled_days as f64 / fulfillment.planned_days as f64;
        }

        // 2. 消耗排名
        let totals = consumed_by_item
            .into_iter()
            .map(|(name, volume)| (name.to_string(), volume))
            .collect();
        let consumption_ranking = self
            .sorter
            .rank_consumption(totals)
            .into_iter()
            .map(|(item_name, consumed_volume)| ItemConsumption {
                item_name,
                consumed_volume,
            })
            .collect();

        // 3. 批次快照
        let lots = registry.snapshot();
        let urgent_lots = self
            .sorter
            .sort_by_expiry(&lots)
            .iter()
            .filter(|lot| lot.is_available())
            .map(snapshot_of)
            .collect();
        let remaining_stock = lots.iter().map(snapshot_of).collect();

        PlanningReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now().naive_utc(),
            planning_elapsed_ms: planning_elapsed.as_secs_f64() * 1000.0,
            fulfillment,
            consumption_ranking,
            urgent_lots,
            remaining_stock,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot_of(lot: &crate::domain::lot::Lot) -> LotSnapshot {
    LotSnapshot {
        lot_id: lot.lot_id.clone(),
        item_name: lot.item_name.clone(),
        stock: lot.stock,
        initial_stock: lot.initial_stock,
        expiry_days: lot.expiry_days,
        risk_level: lot.risk_level(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lot::Lot;
    use crate::domain::plan::DayPlan;

    fn day(day_index: u32, demand: u64, fulfilled: bool, drawn: u64, cost: f64) -> DayPlan {
        let mut plan = DayPlan::empty(day_index, demand, fulfilled);
        plan.committed = drawn > 0;
        plan.drawn_volume = drawn;
        plan.cost = cost;
        plan
    }

    #[test]
    fn test_build_aggregates_log() {
        let mut log = ConsumptionLog::new();
        log.record("Eosina", &day(1, 20, true, 20, 40.0));
        log.record("Xileno", &day(1, 50, true, 60, 90.0));
        log.record("Eosina", &day(2, 40, false, 10, 15.0));

        let registry = LotRegistry::from_lots(vec![
            Lot::new("L001", "Eosina", 10, 0, 2.0, 5),
            Lot::new("L002", "Xileno", 20, 2, 1.5, 70),
            Lot::new("L003", "Eosina", 10, 4, 1.5, 3),
        ]);

        let report = ReportBuilder::new().build(&log, &registry, Duration::from_millis(12));

        assert_eq!(report.fulfillment.planned_days, 3);
        assert_eq!(report.fulfillment.fulfilled_days, 2);
        assert_eq!(report.fulfillment.total_consumed_volume, 90);
        assert!((report.fulfillment.total_cost - 145.0).abs() < 1e-9);
        assert!((report.planning_elapsed_ms - 12.0).abs() < 1e-6);

        assert_eq!(report.consumption_ranking[0].item_name, "Xileno");
        assert_eq!(report.consumption_ranking[1].consumed_volume, 30);

        // L001 无库存, 不在临期列表
        let urgent: Vec<&str> = report.urgent_lots.iter().map(|l| l.lot_id.as_str()).collect();
        assert_eq!(urgent, vec!["L003", "L002"]);
        assert_eq!(report.remaining_stock.len(), 3);
        assert_eq!(report.urgent_lots[0].risk_level, ExpiryRiskLevel::Red);

        let text = report.render_text(5);
        assert!(text.contains("Xileno: 60"));
        assert!(text.contains("满足率: 66.7%"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"consumption_ranking\""));
    }

    #[test]
    fn test_empty_log_report() {
        let report = ReportBuilder::new().build(&ConsumptionLog::new(), &LotRegistry::new(), Duration::ZERO);
        assert_eq!(report.fulfillment.planned_days, 0);
        assert_eq!(report.fulfillment.fulfillment_rate, 0.0);
        assert!(report.render_text(3).contains("无消耗记录"));
    }
}
