// ==========================================
// 病理实验室耗材管理 - 需求计划领域模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 单日需求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandDay {
    pub day_index: u32, // 第几天（从 1 开始）
    pub quantity: u64,  // 需求体积（与 unit_volume 同单位）
}

impl DemandDay {
    pub fn new(day_index: u32, quantity: u64) -> Self {
        Self {
            day_index,
            quantity,
        }
    }
}

/// 单个耗材的逐日需求计划
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandSchedule {
    pub item_name: String,
    pub days: Vec<DemandDay>,
}

impl DemandSchedule {
    pub fn new(item_name: impl Into<String>, days: Vec<DemandDay>) -> Self {
        Self {
            item_name: item_name.into(),
            days,
        }
    }

    /// 按需求量序列构造，day_index 从 1 连续编号
    pub fn from_quantities(item_name: impl Into<String>, quantities: &[u64]) -> Self {
        let days = quantities
            .iter()
            .zip(1u32..)
            .map(|(&quantity, day_index)| DemandDay::new(day_index, quantity))
            .collect();
        Self::new(item_name, days)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_demand(&self) -> u64 {
        self.days.iter().map(|d| d.quantity).sum()
    }
}

/// 需求原始记录（未校验）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRecord {
    pub day_index: i64,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_quantities_numbers_days() {
        let schedule = DemandSchedule::from_quantities("Xileno", &[20, 0, 50]);
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.days[0], DemandDay::new(1, 20));
        assert_eq!(schedule.days[2], DemandDay::new(3, 50));
        assert_eq!(schedule.total_demand(), 70);
    }
}
