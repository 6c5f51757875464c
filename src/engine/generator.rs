// ==========================================
// 病理实验室耗材管理 - 模拟数据生成
// ==========================================
// 职责: 按固定种子生成批次与逐日需求（可复现）
// ==========================================

use crate::domain::demand::DemandSchedule;
use crate::domain::lot::Lot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 实验室耗材名称
pub const LAB_ITEMS: [&str; 7] = [
    "HematoFix",
    "Paraform",
    "Xileno",
    "Eosina",
    "Hematoxilina",
    "Cassetes",
    "Laminas",
];

const UNIT_VOLUMES: [u32; 4] = [5, 10, 20, 50];
const DAILY_DEMANDS: [u64; 6] = [20, 30, 40, 50, 60, 80];

/// 生成批次：每种耗材 1-3 个批次, 批次号 L001 起连续编号
pub fn generate_lots(seed: u64) -> Vec<Lot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lots = Vec::new();
    let mut next_id = 1;

    for item in LAB_ITEMS {
        let lot_count = rng.random_range(1..=3);
        for _ in 0..lot_count {
            let unit_volume = UNIT_VOLUMES[rng.random_range(0..UNIT_VOLUMES.len())];
            let stock = rng.random_range(1..=8);
            // 成本保留两位小数
            let unit_cost = (rng.random_range(10.0..80.0_f64) * 100.0).round() / 100.0;
            let expiry_days = rng.random_range(5..=180);

            lots.push(Lot::new(
                format!("L{:03}", next_id),
                item,
                unit_volume,
                stock,
                unit_cost,
                expiry_days,
            ));
            next_id += 1;
        }
    }

    tracing::debug!(seed, lots = lots.len(), "已生成模拟批次");
    lots
}

/// 生成单耗材的逐日需求
pub fn generate_demand(item_name: &str, days: u32, seed: u64) -> DemandSchedule {
    let mut rng = StdRng::seed_from_u64(seed);
    let quantities: Vec<u64> = (0..days)
        .map(|_| DAILY_DEMANDS[rng.random_range(0..DAILY_DEMANDS.len())])
        .collect();
    DemandSchedule::from_quantities(item_name, &quantities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_lots_is_reproducible() {
        let first = generate_lots(42);
        let second = generate_lots(42);
        assert_eq!(first, second);
        assert!(first.len() >= LAB_ITEMS.len() && first.len() <= LAB_ITEMS.len() * 3);
        assert_eq!(first[0].lot_id, "L001");

        for lot in &first {
            assert!(UNIT_VOLUMES.contains(&lot.unit_volume));
            assert!((1..=8).contains(&lot.stock));
            assert!(lot.unit_cost >= 10.0 && lot.unit_cost <= 80.0);
            assert!((5..=180).contains(&lot.expiry_days));
        }
        for item in LAB_ITEMS {
            assert!(first.iter().any(|lot| lot.item_name == item));
        }
    }

    #[test]
    fn test_generate_demand_days() {
        let schedule = generate_demand("Hematoxilina", 7, 7);
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule.item_name, "Hematoxilina");
        assert!(schedule.days.iter().all(|d| DAILY_DEMANDS.contains(&d.quantity)));
        assert_eq!(schedule, generate_demand("Hematoxilina", 7, 7));
    }
}
