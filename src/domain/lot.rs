// ==========================================
// 病理实验室耗材管理 - 批次领域模型
// ==========================================
// 红线: stock 只减不增, 且永不为负
// ==========================================

use crate::domain::types::ExpiryRiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Lot - 耗材批次（已校验）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub lot_id: String,     // 批次号
    pub item_name: String,  // 耗材名称

    // ===== 库存参数 =====
    pub unit_volume: u32,   // 单位体积（每取一单位的体积）
    pub stock: u32,         // 剩余单位数
    pub initial_stock: u32, // 登记时单位数

    // ===== 成本与效期 =====
    pub unit_cost: f64,     // 单位成本
    pub expiry_days: u32,   // 剩余效期（天），规划期内固定
}

impl Lot {
    /// 构造批次，initial_stock 取当前 stock
    pub fn new(
        lot_id: impl Into<String>,
        item_name: impl Into<String>,
        unit_volume: u32,
        stock: u32,
        unit_cost: f64,
        expiry_days: u32,
    ) -> Self {
        Self {
            lot_id: lot_id.into(),
            item_name: item_name.into(),
            unit_volume,
            stock,
            initial_stock: stock,
            unit_cost,
            expiry_days,
        }
    }

    /// 是否仍可参与分配
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// 剩余可用体积
    pub fn available_volume(&self) -> u64 {
        u64::from(self.stock) * u64::from(self.unit_volume)
    }

    /// 已消耗单位数
    pub fn consumed_units(&self) -> u32 {
        self.initial_stock.saturating_sub(self.stock)
    }

    /// 已消耗体积
    pub fn consumed_volume(&self) -> u64 {
        u64::from(self.consumed_units()) * u64::from(self.unit_volume)
    }

    /// 从批次扣减库存
    ///
    /// # 返回
    /// 实际扣减的单位数（不超过剩余库存）
    pub fn draw(&mut self, units: u32) -> u32 {
        debug_assert!(units <= self.stock, "扣减数量超过剩余库存");
        let drawn = units.min(self.stock);
        self.stock -= drawn;
        drawn
    }

    pub fn risk_level(&self) -> ExpiryRiskLevel {
        ExpiryRiskLevel::from_expiry_days(self.expiry_days)
    }
}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | 批次 {} | 单位体积={} | 库存={} | 成本={:.2} | 效期={}天",
            self.item_name, self.lot_id, self.unit_volume, self.stock, self.unit_cost, self.expiry_days
        )
    }
}

// ==========================================
// LotRecord - 批次原始记录（未校验）
// ==========================================
// 数值字段为有符号类型, 以便校验器拒绝负数输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotRecord {
    pub lot_id: String,
    pub item_name: String,
    pub unit_volume: i64,
    pub stock: i64,
    pub unit_cost: f64,
    pub expiry_days: i64,
}

impl From<&Lot> for LotRecord {
    fn from(lot: &Lot) -> Self {
        Self {
            lot_id: lot.lot_id.clone(),
            item_name: lot.item_name.clone(),
            unit_volume: i64::from(lot.unit_volume),
            stock: i64::from(lot.stock),
            unit_cost: lot.unit_cost,
            expiry_days: i64::from(lot.expiry_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_and_consumption() {
        let mut lot = Lot::new("L001", "Eosina", 20, 5, 12.5, 40);
        assert_eq!(lot.available_volume(), 100);

        assert_eq!(lot.draw(3), 3);
        assert_eq!(lot.stock, 2);
        assert_eq!(lot.consumed_units(), 3);
        assert_eq!(lot.consumed_volume(), 60);
        assert!(lot.is_available());

        lot.draw(2);
        assert!(!lot.is_available());
        assert_eq!(lot.initial_stock, 5);
    }

    #[test]
    fn test_display_contains_key_fields() {
        let lot = Lot::new("L007", "Laminas", 5, 8, 10.0, 3);
        let text = lot.to_string();
        assert!(text.contains("L007"));
        assert!(text.contains("Laminas"));
        assert!(text.contains("效期=3天"));
    }
}
