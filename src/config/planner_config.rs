use crate::config::error::ConfigError;
use crate::domain::types::LotOrderPolicy;
use serde::{Deserialize, Serialize};

/// 默认体积状态数上限
pub const DEFAULT_MAX_VOLUME_LEVELS: u64 = 1_000_000;

/// 规划参数（惩罚系数、批次排序策略等）
///
/// 成本模型：
/// - 效期附加费（每单位）= `expiry_weight * expiry_rate * max(0, expiry_horizon_days - expiry_days) * unit_cost`
/// - 浪费惩罚 = `waste_weight * max(0, 取用体积 - 需求体积)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 浪费惩罚系数（每超出一单位体积）
    pub waste_weight: f64,

    /// 效期惩罚总权重
    pub expiry_weight: f64,

    /// 每一天紧迫度对应的成本比例
    pub expiry_rate: f64,

    /// 效期紧迫度起算窗口（天）；剩余效期不低于该值时无附加费
    pub expiry_horizon_days: u32,

    /// DP 处理批次的顺序（决定平局取向）
    pub lot_order: LotOrderPolicy,

    /// 未满足日是否仍扣减部分取用的库存
    pub commit_partial_draws: bool,

    /// 单日求解体积状态数上限；单位体积与单日需求均不得超过该值
    pub max_volume_levels: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            waste_weight: 0.02,
            expiry_weight: 1.0,
            expiry_rate: 0.02,
            expiry_horizon_days: 60,
            lot_order: LotOrderPolicy::default(),
            commit_partial_draws: true,
            max_volume_levels: DEFAULT_MAX_VOLUME_LEVELS,
        }
    }
}

impl PlannerConfig {
    /// 从 JSON 字符串解析（缺省字段取默认值）并校验
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 校验参数取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_weight("waste_weight", self.waste_weight)?;
        check_weight("expiry_weight", self.expiry_weight)?;
        check_weight("expiry_rate", self.expiry_rate)?;
        if self.max_volume_levels == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_volume_levels".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

fn check_weight(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("必须为非负有限数, 实际 {}", value),
        });
    }
    Ok(())
}
