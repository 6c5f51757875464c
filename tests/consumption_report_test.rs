// ==========================================
// 消耗日志与报表集成测试
// ==========================================
// 测试目标: 规划后队列/栈视图与报表统计
// ==========================================


use lab_supply_planner::engine::generator::{generate_demand, generate_lots};
use lab_supply_planner::{InventoryApi, LotRecord, PlanningReport};
use test_helpers::{approx_eq, demand_records, lot_record, two_lot_scenario};

#[test]
fn test_log_views_follow_planning_order() {
    println!("\n=== 测试：消耗日志视图 ===");

    let mut api = InventoryApi::default();
    api.register_lots(&two_lot_scenario("Eosina")).unwrap();
    api.register_lots(&[lot_record("X1", "Xileno", 10, 5, 8.0, 90)]).unwrap();

    api.plan_item("Eosina", &demand_records(&[8, 8])).unwrap();
    api.plan_item("Xileno", &demand_records(&[20])).unwrap();

    let log = api.consumption_log();
    assert_eq!(log.len(), 3);

    let fifo: Vec<(String, u32)> = log
        .fifo_cursor()
        .map(|r| (r.item_name.clone(), r.day_index))
        .collect();
    assert_eq!(
        fifo,
        vec![
            ("Eosina".to_string(), 1),
            ("Eosina".to_string(), 2),
            ("Xileno".to_string(), 1)
        ]
    );

    let lifo: Vec<u64> = log.lifo_cursor().map(|r| r.sequence_no).collect();
    assert_eq!(lifo, vec![3, 2, 1]);

    let latest = log.latest(2);
    assert_eq!(latest[0].item_name, "Xileno");
    assert_eq!(log.records_for("Eosina").count(), 2);

    // 记录中的取用明细与方案一致
    let first = log.fifo().next().unwrap();
    assert_eq!(first.draws.len(), 1);
    assert_eq!(first.draws[0].lot_id, "L2");

    println!("✓ 消耗日志视图通过");
}

#[test]
fn test_report_after_planning() {
    println!("\n=== 测试：规划报表 ===");

    let mut api = InventoryApi::default();
    api.register_lots(&two_lot_scenario("Eosina")).unwrap();
    api.register_lots(&[lot_record("X1", "Xileno", 10, 1, 8.0, 90)]).unwrap();

    api.plan_item("Eosina", &demand_records(&[8, 8])).unwrap();
    api.plan_item("Xileno", &demand_records(&[30])).unwrap();

    let report = api.build_report();
    println!("{}", report.render_text(5));

    let summary = &report.fulfillment;
    assert_eq!(summary.planned_days, 3);
    assert_eq!(summary.fulfilled_days, 2);
    assert_eq!(summary.unfulfilled_days, 1);
    assert_eq!(summary.total_demand, 46);
    assert_eq!(summary.total_consumed_volume, 26);
    assert!(approx_eq(summary.total_cost, 144.8 + 8.0));

    assert_eq!(report.consumption_ranking[0].item_name, "Eosina");
    assert_eq!(report.consumption_ranking[0].consumed_volume, 16);
    assert_eq!(report.consumption_ranking[1].consumed_volume, 10);

    // 仅剩 L1 有库存
    let urgent: Vec<&str> = report.urgent_lots.iter().map(|l| l.lot_id.as_str()).collect();
    assert_eq!(urgent, vec!["L1"]);
    assert_eq!(report.remaining_stock.len(), 3);

    println!("✓ 规划报表通过");
}

#[test]
fn test_report_json_export() {
    let lots = generate_lots(42);
    let records: Vec<LotRecord> = lots.iter().map(LotRecord::from).collect();
    let mut api = InventoryApi::default();
    api.register_lots(&records).unwrap();

    let schedule = generate_demand("Laminas", 5, 3);
    let quantities: Vec<i64> = schedule.days.iter().map(|d| d.quantity as i64).collect();
    api.plan_item("Laminas", &demand_records(&quantities)).unwrap();

    let report = api.build_report();
    let json = report.to_json().unwrap();
    let parsed: PlanningReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.run_id, report.run_id);
    assert_eq!(parsed.fulfillment.planned_days, 5);
    assert_eq!(parsed.remaining_stock.len(), lots.len());
}
