use crate::config::PlannerConfig;
use crate::domain::lot::Lot;

/// 成本模型：基础成本 + 效期附加费 + 浪费惩罚
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyModel {
    pub waste_weight: f64,
    pub expiry_weight: f64,
    pub expiry_rate: f64,
    pub expiry_horizon_days: u32,
}

impl PenaltyModel {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            waste_weight: config.waste_weight,
            expiry_weight: config.expiry_weight,
            expiry_rate: config.expiry_rate,
            expiry_horizon_days: config.expiry_horizon_days,
        }
    }

    /// 每单位效期附加费
    ///
    /// 剩余效期越短, 紧迫度越高, 附加费越大；超出窗口的批次为 0。
    pub fn expiry_surcharge_per_unit(&self, lot: &Lot) -> f64 {
        let urgency = self.expiry_horizon_days.saturating_sub(lot.expiry_days);
        self.expiry_weight * self.expiry_rate * f64::from(urgency) * lot.unit_cost
    }

    /// 单批次取用的效期惩罚
    pub fn expiry_penalty(&self, lot: &Lot, units: u32) -> f64 {
        f64::from(units) * self.expiry_surcharge_per_unit(lot)
    }

    /// 单批次取用的有效单价（基础单价 + 效期附加费）
    pub fn effective_unit_cost(&self, lot: &Lot) -> f64 {
        lot.unit_cost + self.expiry_surcharge_per_unit(lot)
    }

    /// 浪费惩罚（仅在整组组合确定后计算）
    pub fn waste_penalty(&self, drawn_volume: u64, demand: u64) -> f64 {
        self.waste_weight * drawn_volume.saturating_sub(demand) as f64
    }

    /// 任意组合的有效成本
    ///
    /// # 参数
    /// - `draws`: (批次, 取用单位数)
    /// - `demand`: 当日需求体积
    pub fn effective_cost<'a, I>(&self, draws: I, demand: u64) -> f64
    where
        I: IntoIterator<Item = (&'a Lot, u32)>,
    {
        let mut volume = 0u64;
        let mut cost = 0.0;
        for (lot, units) in draws {
            volume += u64::from(units) * u64::from(lot.unit_volume);
            cost += f64::from(units) * self.effective_unit_cost(lot);
        }
        cost + self.waste_penalty(volume, demand)
    }
}

impl Default for PenaltyModel {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}
