// ==========================================
// 病理实验室耗材管理 - 领域类型定义
// ==========================================
// 职责: 批次排序策略、效期风险等级
// ==========================================

use crate::domain::lot::Lot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// 批次排序策略 (Lot Order Policy)
// ==========================================
// 红线: DP 处理批次的顺序必须显式配置,不可依赖容器迭代顺序
// 成本相同的组合中,排序靠前的批次优先被取用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotOrderPolicy {
    /// 效期升序, 再按 lot_id 升序（默认: 临期批次在平局时优先）
    ExpiryThenId,
    /// 效期降序, 再按 lot_id 升序
    ExpiryDescThenId,
    /// 仅按 lot_id 升序
    IdOnly,
}

impl LotOrderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotOrderPolicy::ExpiryThenId => "expiry_then_id",
            LotOrderPolicy::ExpiryDescThenId => "expiry_desc_then_id",
            LotOrderPolicy::IdOnly => "id_only",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            LotOrderPolicy::ExpiryThenId => "临期优先",
            LotOrderPolicy::ExpiryDescThenId => "远期优先",
            LotOrderPolicy::IdOnly => "批次号顺序",
        }
    }

    /// 按策略比较两个批次
    pub fn compare(&self, a: &Lot, b: &Lot) -> Ordering {
        match self {
            LotOrderPolicy::ExpiryThenId => a
                .expiry_days
                .cmp(&b.expiry_days)
                .then_with(|| a.lot_id.cmp(&b.lot_id)),
            LotOrderPolicy::ExpiryDescThenId => b
                .expiry_days
                .cmp(&a.expiry_days)
                .then_with(|| a.lot_id.cmp(&b.lot_id)),
            LotOrderPolicy::IdOnly => a.lot_id.cmp(&b.lot_id),
        }
    }
}

impl Default for LotOrderPolicy {
    fn default() -> Self {
        LotOrderPolicy::ExpiryThenId
    }
}

impl fmt::Display for LotOrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LotOrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expiry_then_id" | "expiry-then-id" => Ok(LotOrderPolicy::ExpiryThenId),
            "expiry_desc_then_id" | "expiry-desc-then-id" => Ok(LotOrderPolicy::ExpiryDescThenId),
            "id_only" | "id-only" => Ok(LotOrderPolicy::IdOnly),
            other => Err(format!("未知批次排序策略: {}", other)),
        }
    }
}

// ==========================================
// 效期风险等级 (Expiry Risk Level)
// ==========================================
// 顺序: Green < Yellow < Orange < Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryRiskLevel {
    Green,  // 效期充足 (> 60 天)
    Yellow, // 关注 (31-60 天)
    Orange, // 临期 (8-30 天)
    Red,    // 高危 (<= 7 天)
}

impl ExpiryRiskLevel {
    /// 按剩余效期天数判定风险等级
    pub fn from_expiry_days(expiry_days: u32) -> Self {
        match expiry_days {
            0..=7 => ExpiryRiskLevel::Red,
            8..=30 => ExpiryRiskLevel::Orange,
            31..=60 => ExpiryRiskLevel::Yellow,
            _ => ExpiryRiskLevel::Green,
        }
    }
}

impl fmt::Display for ExpiryRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryRiskLevel::Green => write!(f, "GREEN"),
            ExpiryRiskLevel::Yellow => write!(f, "YELLOW"),
            ExpiryRiskLevel::Orange => write!(f, "ORANGE"),
            ExpiryRiskLevel::Red => write!(f, "RED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str_roundtrip() {
        for policy in [
            LotOrderPolicy::ExpiryThenId,
            LotOrderPolicy::ExpiryDescThenId,
            LotOrderPolicy::IdOnly,
        ] {
            assert_eq!(policy.as_str().parse::<LotOrderPolicy>().unwrap(), policy);
        }
        assert!("newest_first".parse::<LotOrderPolicy>().is_err());
    }

    #[test]
    fn test_expiry_then_id_ordering() {
        let a = Lot::new("L002", "Xileno", 10, 1, 1.0, 5);
        let b = Lot::new("L001", "Xileno", 10, 1, 1.0, 5);
        let c = Lot::new("L003", "Xileno", 10, 1, 1.0, 2);

        let policy = LotOrderPolicy::ExpiryThenId;
        assert_eq!(policy.compare(&c, &a), Ordering::Less);
        assert_eq!(policy.compare(&b, &a), Ordering::Less);
        assert_eq!(LotOrderPolicy::ExpiryDescThenId.compare(&c, &a), Ordering::Greater);
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(ExpiryRiskLevel::from_expiry_days(0), ExpiryRiskLevel::Red);
        assert_eq!(ExpiryRiskLevel::from_expiry_days(7), ExpiryRiskLevel::Red);
        assert_eq!(ExpiryRiskLevel::from_expiry_days(30), ExpiryRiskLevel::Orange);
        assert_eq!(ExpiryRiskLevel::from_expiry_days(60), ExpiryRiskLevel::Yellow);
        assert_eq!(ExpiryRiskLevel::from_expiry_days(61), ExpiryRiskLevel::Green);
        assert!(ExpiryRiskLevel::Red > ExpiryRiskLevel::Yellow);
    }
}
