// ==========================================
// 病理实验室耗材管理 - 批次登记簿
// ==========================================
// 职责: 按耗材名称分组持有批次
// 红线: 不同耗材的批次互不相交, 规划时只借出单个耗材的可变切片
// ==========================================

use crate::domain::lot::Lot;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct LotRegistry {
    // BTreeMap 保证按耗材名称的确定性迭代
    items: BTreeMap<String, Vec<Lot>>,
}

impl LotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按耗材分组构建
    pub fn from_lots(lots: impl IntoIterator<Item = Lot>) -> Self {
        let mut registry = Self::new();
        for lot in lots {
            registry.register(lot);
        }
        registry
    }

    pub fn register(&mut self, lot: Lot) {
        self.items.entry(lot.item_name.clone()).or_default().push(lot);
    }

    pub fn contains_lot(&self, lot_id: &str) -> bool {
        self.iter().any(|lot| lot.lot_id == lot_id)
    }

    /// 指定耗材的批次（不存在时为空切片）
    pub fn lots_for(&self, item_name: &str) -> &[Lot] {
        self.items.get(item_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 指定耗材的可变批次切片（规划期间独占）
    pub fn lots_for_mut(&mut self, item_name: &str) -> &mut [Lot] {
        match self.items.get_mut(item_name) {
            Some(lots) => lots.as_mut_slice(),
            None => &mut [],
        }
    }

    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// 全部批次（按耗材名称、登记顺序）
    pub fn iter(&self) -> impl Iterator<Item = &Lot> {
        self.items.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_stock_volume(&self, item_name: &str) -> u64 {
        self.lots_for(item_name)
            .iter()
            .fold(0u64, |acc, lot| acc.saturating_add(lot.available_volume()))
    }

    /// 全部批次的拷贝（用于报表/排序）
    pub fn snapshot(&self) -> Vec<Lot> {
        self.iter().cloned().collect()
    }
}
