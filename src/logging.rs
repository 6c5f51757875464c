// ==========================================
// 病理实验室耗材管理 - 日志初始化
// ==========================================
// 日志目标:
//   lab_supply_planner::engine::allocation  逐日求解结果（debug 满足, warn 缺货）
//   lab_supply_planner::api                 批次登记与多耗材汇总
//   perf                                    PerfGuard 耗时（elapsed_ms）
// 输出格式: 默认文本, LAB_SUPPLY_LOG_FORMAT=json 时输出 JSON 行
// ==========================================

use crate::config::config_keys;
use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的过滤器
const DEFAULT_FILTER: &str = "info";

/// 测试过滤器: 本 crate 与耗时日志开到 debug
const TEST_FILTER: &str = "lab_supply_planner=debug,perf=debug";

/// 初始化日志
///
/// 常用过滤器:
/// - `RUST_LOG=lab_supply_planner::engine::allocation=debug` 查看每日取用明细
/// - `RUST_LOG=info,perf=info` 只看规划耗时
///
/// 重复调用不会替换已安装的 subscriber。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(config_keys::LOG_FORMAT)
        .map(|v| is_json_format(&v))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 测试用日志, 输出走 test writer
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}

fn is_json_format(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("json")
}
