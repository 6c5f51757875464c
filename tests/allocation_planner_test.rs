// ==========================================
// AllocationPlanner 集成测试
// ==========================================
// 测试目标: 通过 InventoryApi 验证逐日分配规划
// 覆盖范围: 效期偏好、库存守恒、缺货降级、多耗材隔离、确定性
// ==========================================


use lab_supply_planner::domain::Plan;
use lab_supply_planner::engine::generator::{generate_demand, generate_lots, LAB_ITEMS};
use lab_supply_planner::{InventoryApi, LotRecord, PlannerConfig};
use std::collections::HashMap;
use test_helpers::{approx_eq, demand_records, lot_record, two_lot_scenario};

/// 每个批次在已扣减日的取用单位数之和
fn committed_units_by_lot(plan: &Plan) -> HashMap<String, u32> {
    let mut totals = HashMap::new();
    for day in plan.days.iter().filter(|d| d.committed) {
        for draw in day.choices.iter() {
            *totals.entry(draw.lot_id.clone()).or_insert(0) += draw.units;
        }
    }
    totals
}

#[test]
fn test_two_lot_scenario_through_api() {
    println!("\n=== 测试：两批次效期偏好场景 ===");
    lab_supply_planner::logging::init_test();

    let mut api = InventoryApi::default();
    api.register_lots(&two_lot_scenario("Eosina")).unwrap();

    let plan = api.plan_item("Eosina", &demand_records(&[8, 8])).unwrap();
    assert_eq!(plan.len(), 2);

    println!("第1天: {:?}", plan.days[0].choices.as_pairs());
    assert_eq!(plan.days[0].choices.units_for("L2"), 8);
    assert!(approx_eq(plan.days[0].cost, 64.0));

    println!("第2天: {:?}", plan.days[1].choices.as_pairs());
    assert_eq!(plan.days[1].choices.units_for("L2"), 2);
    assert_eq!(plan.days[1].choices.units_for("L1"), 6);
    assert!(approx_eq(plan.days[1].cost, 80.8));

    assert_eq!(api.find_lot("L1").map(|l| l.stock), Some(4));
    assert_eq!(api.find_lot("L2").map(|l| l.stock), Some(0));
    assert!(approx_eq(plan.total_cost(), 144.8));

    println!("✓ 两批次场景通过");
}

#[test]
fn test_stock_conservation_on_generated_data() {
    println!("\n=== 测试：库存守恒（模拟数据） ===");

    let lots = generate_lots(42);
    let records: Vec<LotRecord> = lots.iter().map(LotRecord::from).collect();
    let mut api = InventoryApi::default();
    api.register_lots(&records).unwrap();

    for (offset, item) in LAB_ITEMS.iter().enumerate() {
        let schedule = generate_demand(item, 7, 7 + offset as u64);
        let quantities: Vec<i64> = schedule.days.iter().map(|d| d.quantity as i64).collect();
        let plan = api.plan_item(item, &demand_records(&quantities)).unwrap();

        let committed = committed_units_by_lot(&plan);
        for lot in api.registry().lots_for(item) {
            let drawn = committed.get(&lot.lot_id).copied().unwrap_or(0);
            assert_eq!(lot.initial_stock - lot.stock, drawn, "批次 {} 库存不守恒", lot.lot_id);
        }

        // 满足日取用体积必须覆盖需求
        for day in &plan.days {
            if day.fulfilled {
                assert!(day.drawn_volume >= day.demand);
            } else {
                assert!(day.drawn_volume < day.demand);
            }
            assert_eq!(day.drawn_volume, day.choices.total_volume());
        }
        println!("{}: 满足 {}/{} 天", item, plan.fulfilled_days(), plan.len());
    }

    println!("✓ 库存守恒通过");
}

#[test]
fn test_shortage_draws_everything_and_reports_unfulfilled() {
    println!("\n=== 测试：缺货降级 ===");

    let mut api = InventoryApi::default();
    api.register_lots(&[lot_record("L001", "Xileno", 10, 2, 1.0, 100)]).unwrap();

    let plan = api.plan_item("Xileno", &demand_records(&[50, 10])).unwrap();

    let day1 = &plan.days[0];
    assert!(!day1.fulfilled);
    assert!(day1.committed);
    assert_eq!(day1.drawn_volume, 20);
    assert_eq!(day1.shortfall(), 30);
    assert!(approx_eq(day1.cost, 2.0));

    // 库存耗尽后次日无可用批次
    let day2 = &plan.days[1];
    assert!(!day2.fulfilled);
    assert_eq!(day2.drawn_volume, 0);
    assert!(day2.choices.is_empty());
    assert_eq!(api.find_lot("L001").map(|l| l.stock), Some(0));

    println!("✓ 缺货降级通过");
}

#[test]
fn test_partial_draws_not_committed_when_disabled() {
    println!("\n=== 测试：未满足日不扣减库存 ===");

    let config = PlannerConfig {
        commit_partial_draws: false,
        ..PlannerConfig::default()
    };
    let mut api = InventoryApi::new(config);
    api.register_lots(&[lot_record("L001", "Xileno", 10, 2, 1.0, 100)]).unwrap();

    let plan = api.plan_item("Xileno", &demand_records(&[50, 20])).unwrap();

    assert!(!plan.days[0].fulfilled);
    assert!(!plan.days[0].committed);
    // 第 1 天未扣减, 第 2 天仍可满足
    assert!(plan.days[1].fulfilled);
    assert_eq!(api.find_lot("L001").map(|l| l.stock), Some(0));
    assert_eq!(api.consumption_log().fifo().next().map(|r| r.consumed_volume()), Some(0));

    println!("✓ 未满足日不扣减通过");
}

#[test]
fn test_zero_demand_day_is_free() {
    println!("\n=== 测试：零需求日 ===");

    let mut api = InventoryApi::default();
    api.register_lots(&two_lot_scenario("Eosina")).unwrap();

    let plan = api.plan_item("Eosina", &demand_records(&[0])).unwrap();
    let day = &plan.days[0];
    assert!(day.fulfilled);
    assert!(day.choices.is_empty());
    assert!(approx_eq(day.cost, 0.0));
    assert_eq!(api.registry().total_stock_volume("Eosina"), 20);

    println!("✓ 零需求日通过");
}

#[test]
fn test_multi_item_schedules_are_isolated() {
    println!("\n=== 测试：多耗材互不影响 ===");

    let mut api = InventoryApi::default();
    api.register_lots(&two_lot_scenario("Eosina")).unwrap();
    api.register_lots(&[
        lot_record("X1", "Xileno", 5, 4, 12.0, 90),
        lot_record("X2", "Xileno", 20, 2, 30.0, 10),
    ])
    .unwrap();

    let plans = api
        .plan_schedules(&[
            ("Eosina".to_string(), demand_records(&[8])),
            ("Xileno".to_string(), demand_records(&[25])),
        ])
        .unwrap();

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].item_name, "Eosina");
    assert!(plans[0].days[0].choices.iter().all(|d| d.lot_id.starts_with('L')));
    assert!(plans[1].days[0].choices.iter().all(|d| d.lot_id.starts_with('X')));
    assert!(plans[1].days[0].fulfilled);

    assert_eq!(api.consumption_log().len(), 2);
    assert!(api.planning_elapsed() <= std::time::Duration::from_secs(5));

    println!("✓ 多耗材隔离通过");
}

#[test]
fn test_unknown_item_plans_as_unfulfilled() {
    let mut api = InventoryApi::default();
    api.register_lots(&two_lot_scenario("Eosina")).unwrap();

    let plan = api.plan_item("Parafina", &demand_records(&[10, 0])).unwrap();
    assert!(!plan.days[0].fulfilled);
    assert!(plan.days[1].fulfilled);
    assert_eq!(api.registry().total_stock_volume("Eosina"), 20);
}

#[test]
fn test_planning_is_deterministic() {
    println!("\n=== 测试：确定性 ===");

    let run = || {
        let lots = generate_lots(2024);
        let records: Vec<LotRecord> = lots.iter().map(LotRecord::from).collect();
        let mut api = InventoryApi::default();
        api.register_lots(&records).unwrap();
        let schedule = generate_demand("Cassetes", 10, 99);
        let quantities: Vec<i64> = schedule.days.iter().map(|d| d.quantity as i64).collect();
        api.plan_item("Cassetes", &demand_records(&quantities)).unwrap()
    };

    assert_eq!(run(), run());
    println!("✓ 确定性通过");
}
