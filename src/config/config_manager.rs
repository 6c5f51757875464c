// ==========================================
// 病理实验室耗材管理 - 配置管理器
// ==========================================
// 职责: 配置加载与多级覆写
// 优先级: 环境变量 > JSON 配置文件 > 默认值
// ==========================================

use crate::config::error::ConfigError;
use crate::config::planner_config::PlannerConfig;
use crate::domain::types::LotOrderPolicy;
use std::path::Path;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug)]
pub struct ConfigManager {
    config: PlannerConfig,
}

impl ConfigManager {
    /// 使用默认配置
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// 从 JSON 配置文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = PlannerConfig::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "已加载配置文件");
        Ok(Self { config })
    }

    /// 加载配置：可选配置文件 + 进程环境变量覆写
    pub fn load(path: Option<&Path>) -> Result<PlannerConfig, ConfigError> {
        let manager = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::new(),
        };
        manager
            .with_overrides(|key| std::env::var(key).ok())
            .map(ConfigManager::into_config)
    }

    /// 应用覆写
    ///
    /// # 参数
    /// - lookup: 按 `config_keys` 中的键名返回覆写值（None 表示不覆写）
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(config_keys::WASTE_WEIGHT) {
            self.config.waste_weight = parse_value(config_keys::WASTE_WEIGHT, &v)?;
        }
        if let Some(v) = lookup(config_keys::EXPIRY_WEIGHT) {
            self.config.expiry_weight = parse_value(config_keys::EXPIRY_WEIGHT, &v)?;
        }
        if let Some(v) = lookup(config_keys::EXPIRY_RATE) {
            self.config.expiry_rate = parse_value(config_keys::EXPIRY_RATE, &v)?;
        }
        if let Some(v) = lookup(config_keys::EXPIRY_HORIZON_DAYS) {
            self.config.expiry_horizon_days = parse_value(config_keys::EXPIRY_HORIZON_DAYS, &v)?;
        }
        if let Some(v) = lookup(config_keys::LOT_ORDER) {
            self.config.lot_order = v
                .parse::<LotOrderPolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: config_keys::LOT_ORDER.to_string(),
                    message,
                })?;
        }
        if let Some(v) = lookup(config_keys::MAX_VOLUME_LEVELS) {
            self.config.max_volume_levels = parse_value(config_keys::MAX_VOLUME_LEVELS, &v)?;
        }
        if let Some(v) = lookup(config_keys::COMMIT_PARTIAL_DRAWS) {
            self.config.commit_partial_draws = is_true(&v);
        }

        self.config.validate()?;
        Ok(self)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn into_config(self) -> PlannerConfig {
        self.config
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("无法解析 '{}': {}", raw, e),
        })
}

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    // 惩罚系数
    pub const WASTE_WEIGHT: &str = "LAB_SUPPLY_WASTE_WEIGHT";
    pub const EXPIRY_WEIGHT: &str = "LAB_SUPPLY_EXPIRY_WEIGHT";
    pub const EXPIRY_RATE: &str = "LAB_SUPPLY_EXPIRY_RATE";
    pub const EXPIRY_HORIZON_DAYS: &str = "LAB_SUPPLY_EXPIRY_HORIZON_DAYS";

    // 规划策略
    pub const LOT_ORDER: &str = "LAB_SUPPLY_LOT_ORDER";
    pub const COMMIT_PARTIAL_DRAWS: &str = "LAB_SUPPLY_COMMIT_PARTIAL_DRAWS";
    pub const MAX_VOLUME_LEVELS: &str = "LAB_SUPPLY_MAX_VOLUME_LEVELS";

    // 日志
    pub const LOG_FORMAT: &str = "LAB_SUPPLY_LOG_FORMAT";
}
