// ==========================================
// 病理实验室耗材管理 - 命令行演示入口
// ==========================================
// 用法:
//   lab-supply-planner [config.json|-] [item] [days]
// 默认: 无配置文件, item=Hematoxilina, days=7
// ==========================================

use anyhow::{Context, Result};
use lab_supply_planner::domain::{DemandRecord, LotRecord};
use lab_supply_planner::engine::generator::{generate_demand, generate_lots};
use lab_supply_planner::engine::{sequential_search_by_id, LotIndex};
use lab_supply_planner::{logging, ConfigManager, InventoryApi};
use std::path::PathBuf;

const LOT_SEED: u64 = 42;
const DEMAND_SEED: u64 = 7;

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .filter(|s| s.trim() != "-" && !s.trim().is_empty())
        .map(PathBuf::from);
    let item = args.next().unwrap_or_else(|| "Hematoxilina".to_string());
    let days: u32 = match args.next() {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("天数参数无效: {}", raw))?,
        None => 7,
    };

    let config = ConfigManager::load(config_path.as_deref()).context("加载规划配置失败")?;
    tracing::info!(version = lab_supply_planner::VERSION, item = %item, days, "启动规划演示");

    println!("==================================================");
    println!("{}", lab_supply_planner::APP_NAME);
    println!("系统版本: {}", lab_supply_planner::VERSION);
    println!("==================================================");

    // 1. 生成并登记批次
    let lots = generate_lots(LOT_SEED);
    let records: Vec<LotRecord> = lots.iter().map(LotRecord::from).collect();
    let mut api = InventoryApi::new(config);
    api.register_lots(&records).context("登记批次失败")?;

    println!("\n📦 批次清单 ({} 个):", lots.len());
    for lot in &lots {
        println!("  {}", lot);
    }

    // 2. 检索
    println!("\n🔍 顺序查找 '{}':", item);
    for lot in api.search_by_name(&item) {
        println!("  {}", lot);
    }

    let index = LotIndex::build(&lots);
    println!("🔍 二分查找 '{}': {} 个批次", item, index.find_by_name(&item).len());
    if let Some(first) = lots.first() {
        let by_seq = sequential_search_by_id(&lots, &first.lot_id).map(|l| l.lot_id.as_str());
        let by_bin = index.find_by_id(&first.lot_id).map(|l| l.lot_id.as_str());
        println!("🔍 批次号 {}: 顺序={:?} 二分={:?}", first.lot_id, by_seq, by_bin);
    }

    // 3. 效期排序
    println!("\n⏳ 最临期批次 (归并排序):");
    for lot in api.lots_by_expiry().iter().take(5) {
        println!("  {}", lot);
    }

    // 4. 规划
    let schedule = generate_demand(&item, days, DEMAND_SEED);
    let demand: Vec<DemandRecord> = schedule
        .days
        .iter()
        .map(|d| DemandRecord {
            day_index: i64::from(d.day_index),
            quantity: d.quantity as i64,
        })
        .collect();
    let plan = api.plan_item(&item, &demand).context("规划失败")?;

    println!(
        "\n🧪 {} 逐日规划 (平局策略: {}):",
        item,
        api.config().lot_order.title_cn()
    );
    for day in &plan.days {
        let picks: Vec<String> = day
            .choices
            .iter()
            .map(|d| format!("{}x{}", d.lot_id, d.units))
            .collect();
        println!(
            "  第{}天 需求={} 满足={} 取用体积={} 成本={:.2} 批次=[{}]",
            day.day_index,
            day.demand,
            if day.fulfilled { "是" } else { "否" },
            day.drawn_volume,
            day.cost,
            picks.join(", ")
        );
    }

    // 5. 消耗日志视图
    let log = api.consumption_log();
    println!("\n📜 队列长度={} 栈长度={}", log.fifo_cursor().remaining(), log.lifo_cursor().remaining());
    println!("最近 3 条记录 (LIFO):");
    for record in log.lifo_cursor().take(3) {
        println!(
            "  #{} {} 第{}天 消耗体积={} 成本={:.2}",
            record.sequence_no,
            record.item_name,
            record.day_index,
            record.consumed_volume(),
            record.cost
        );
    }

    // 6. 报表
    let report = api.build_report();
    println!("\n{}", report.render_text(5));

    Ok(())
}
