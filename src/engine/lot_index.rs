// ==========================================
// 病理实验室耗材管理 - 批次检索
// ==========================================
// 职责: 按耗材名称 / 批次号检索批次
// 算法: 顺序查找（模糊, 不区分大小写）、二分查找（精确）
// 红线: 未命中返回空结果, 不视为错误
// ==========================================

use crate::domain::lot::Lot;
use crate::engine::lot_sorter::merge_sort_by;

/// 顺序查找：名称包含关键字（不区分大小写）
pub fn sequential_search_by_name<'a>(lots: &'a [Lot], name: &str) -> Vec<&'a Lot> {
    let needle = name.to_lowercase();
    lots.iter()
        .filter(|lot| lot.item_name.to_lowercase().contains(&needle))
        .collect()
}

/// 顺序查找：批次号精确匹配
pub fn sequential_search_by_id<'a>(lots: &'a [Lot], lot_id: &str) -> Option<&'a Lot> {
    lots.iter().find(|lot| lot.lot_id == lot_id)
}

// ==========================================
// LotIndex - 有序索引（二分查找）
// ==========================================
#[derive(Debug, Clone)]
pub struct LotIndex<'a> {
    /// (小写名称, 批次) 按名称排序
    by_name: Vec<(String, &'a Lot)>,
    /// 按 lot_id 排序
    by_id: Vec<&'a Lot>,
}

impl<'a> LotIndex<'a> {
    /// 构建索引（归并排序，同名批次保持输入顺序）
    pub fn build(lots: &'a [Lot]) -> Self {
        let keyed: Vec<(String, &'a Lot)> = lots
            .iter()
            .map(|lot| (lot.item_name.to_lowercase(), lot))
            .collect();
        let by_name = merge_sort_by(&keyed, |a, b| a.0.cmp(&b.0));

        let refs: Vec<&'a Lot> = lots.iter().collect();
        let by_id = merge_sort_by(&refs, |a, b| a.lot_id.cmp(&b.lot_id));

        Self { by_name, by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// 二分查找：名称完全相同（不区分大小写）的全部批次
    pub fn find_by_name(&self, name: &str) -> Vec<&'a Lot> {
        let key = name.to_lowercase();
        let start = self.by_name.partition_point(|(k, _)| k.as_str() < key.as_str());
        self.by_name[start..]
            .iter()
            .take_while(|(k, _)| *k == key)
            .map(|(_, lot)| *lot)
            .collect()
    }

    /// 二分查找：批次号
    pub fn find_by_id(&self, lot_id: &str) -> Option<&'a Lot> {
        self.by_id
            .binary_search_by(|lot| lot.lot_id.as_str().cmp(lot_id))
            .ok()
            .map(|i| self.by_id[i])
    }

    /// 按名称排序后的批次视图
    pub fn sorted_by_name(&self) -> impl Iterator<Item = &'a Lot> + '_ {
        self.by_name.iter().map(|(_, lot)| *lot)
    }
}
