// ==========================================
// 病理实验室耗材管理 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 输入记录校验失败时给出字段级原因
// 红线: 需求无法满足属于规划结果, 不是错误
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含出错的记录与字段
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("批次数据无效: lot_id={lot_id}, 字段={field}, 原因={message}")]
    InvalidLot {
        lot_id: String,
        field: String,
        message: String,
    },

    #[error("需求数据无效: item={item}, day={day}, 字段={field}, 原因={message}")]
    InvalidDemand {
        item: String,
        day: i64,
        field: String,
        message: String,
    },

    #[error("批次号重复: {0}")]
    DuplicateLot(String),

    #[error("批次耗材不一致: 规划耗材={item}, 批次={lot_id} 属于 {found}")]
    MixedItemLots {
        item: String,
        lot_id: String,
        found: String,
    },

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    pub(crate) fn invalid_lot(lot_id: &str, field: &str, message: impl Into<String>) -> Self {
        ApiError::InvalidLot {
            lot_id: lot_id.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_demand(
        item: &str,
        day: i64,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        ApiError::InvalidDemand {
            item: item.to_string(),
            day,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
