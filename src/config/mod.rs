// ==========================================
// 病理实验室耗材管理 - 配置层
// ==========================================
// 职责: 规划参数加载、覆写与校验
// 来源: 默认值 / JSON 文件 / 环境变量
// ==========================================

pub mod config_manager;
pub mod error;
pub mod planner_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use error::ConfigError;
pub use planner_config::PlannerConfig;
