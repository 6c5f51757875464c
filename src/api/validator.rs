// ==========================================
// 病理实验室耗材管理 - 输入记录校验器
// ==========================================
// 职责: 把原始批次/需求记录转换为已校验的领域对象
// 红线: 校验失败立即返回, 不做部分登记
// ==========================================

use std::collections::HashSet;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::demand::{DemandDay, DemandRecord, DemandSchedule};
use crate::domain::lot::{Lot, LotRecord};

/// 校验单条批次记录
///
/// # 规则
/// - lot_id / item_name 非空
/// - 1 <= unit_volume <= max_volume_levels, stock >= 0, expiry_days >= 0（均需在 u32 范围内）
/// - unit_cost 为有限非负数
pub fn validate_lot_record(record: &LotRecord, max_volume_levels: u64) -> ApiResult<Lot> {
    let lot_id = record.lot_id.trim();
    if lot_id.is_empty() {
        return Err(ApiError::invalid_lot(&record.lot_id, "lot_id", "批次号不能为空"));
    }
    if record.item_name.trim().is_empty() {
        return Err(ApiError::invalid_lot(lot_id, "item_name", "耗材名称不能为空"));
    }

    let unit_volume = to_u32(record.unit_volume)
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            ApiError::invalid_lot(
                lot_id,
                "unit_volume",
                format!("必须为正整数, 实际 {}", record.unit_volume),
            )
        })?;
    if u64::from(unit_volume) > max_volume_levels {
        return Err(ApiError::invalid_lot(
            lot_id,
            "unit_volume",
            format!("超过体积状态数上限 {}, 实际 {}", max_volume_levels, unit_volume),
        ));
    }
    let stock = to_u32(record.stock).ok_or_else(|| {
        ApiError::invalid_lot(lot_id, "stock", format!("不能为负数, 实际 {}", record.stock))
    })?;
    if !record.unit_cost.is_finite() || record.unit_cost < 0.0 {
        return Err(ApiError::invalid_lot(
            lot_id,
            "unit_cost",
            format!("必须为有限非负数, 实际 {}", record.unit_cost),
        ));
    }
    let expiry_days = to_u32(record.expiry_days).ok_or_else(|| {
        ApiError::invalid_lot(
            lot_id,
            "expiry_days",
            format!("不能为负数, 实际 {}", record.expiry_days),
        )
    })?;

    Ok(Lot::new(
        lot_id,
        record.item_name.trim(),
        unit_volume,
        stock,
        record.unit_cost,
        expiry_days,
    ))
}

/// 批量校验批次记录, 同时检查批次号重复
pub fn validate_lot_records(records: &[LotRecord], max_volume_levels: u64) -> ApiResult<Vec<Lot>> {
    let mut seen = HashSet::new();
    let mut lots = Vec::with_capacity(records.len());
    for record in records {
        let lot = validate_lot_record(record, max_volume_levels)?;
        if !seen.insert(lot.lot_id.clone()) {
            return Err(ApiError::DuplicateLot(lot.lot_id));
        }
        lots.push(lot);
    }
    Ok(lots)
}

/// 校验需求记录
///
/// # 规则
/// - day_index >= 1 且严格递增
/// - 0 <= quantity <= max_volume_levels
pub fn validate_demand_records(
    item_name: &str,
    records: &[DemandRecord],
    max_volume_levels: u64,
) -> ApiResult<DemandSchedule> {
    let mut days = Vec::with_capacity(records.len());
    let mut previous: Option<u32> = None;

    for record in records {
        let day_index = to_u32(record.day_index).filter(|d| *d >= 1).ok_or_else(|| {
            ApiError::invalid_demand(item_name, record.day_index, "day_index", "天序号必须 >= 1")
        })?;
        if let Some(prev) = previous {
            if day_index <= prev {
                return Err(ApiError::invalid_demand(
                    item_name,
                    record.day_index,
                    "day_index",
                    format!("天序号必须严格递增, 前一天为 {}", prev),
                ));
            }
        }
        let quantity = u64::try_from(record.quantity).map_err(|_| {
            ApiError::invalid_demand(
                item_name,
                record.day_index,
                "quantity",
                format!("需求量不能为负数, 实际 {}", record.quantity),
            )
        })?;
        if quantity > max_volume_levels {
            return Err(ApiError::invalid_demand(
                item_name,
                record.day_index,
                "quantity",
                format!("超过体积状态数上限 {}, 实际 {}", max_volume_levels, quantity),
            ));
        }

        days.push(DemandDay::new(day_index, quantity));
        previous = Some(day_index);
    }

    Ok(DemandSchedule::new(item_name, days))
}

/// 确认批次全部属于同一耗材
pub fn ensure_single_item(item_name: &str, lots: &[Lot]) -> ApiResult<()> {
    match lots.iter().find(|lot| lot.item_name != item_name) {
        Some(lot) => Err(ApiError::MixedItemLots {
            item: item_name.to_string(),
            lot_id: lot.lot_id.clone(),
            found: lot.item_name.clone(),
        }),
        None => Ok(()),
    }
}

fn to_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}
