// ==========================================
// 病理实验室耗材管理 - 批次排序引擎
// ==========================================
// 职责: 按效期 / 消耗量排列批次, 按消耗量排列耗材
// 算法: 迭代归并排序（稳定）、快速排序（Hoare 划分, 中位枢轴）
// ==========================================

use crate::domain::lot::Lot;
use std::cmp::Ordering;

// ==========================================
// 通用排序算法
// ==========================================

/// 自底向上迭代归并排序（稳定）
///
/// # 返回
/// 排序后的新列表，输入不变
pub fn merge_sort_by<T, F>(items: &[T], mut compare: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut current: Vec<T> = items.to_vec();
    let n = current.len();
    if n <= 1 {
        return current;
    }

    let mut buffer: Vec<T> = Vec::with_capacity(n);
    let mut width = 1;
    while width < n {
        buffer.clear();
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                // 相等时取左侧, 保证稳定
                if compare(&current[i], &current[j]) != Ordering::Greater {
                    buffer.push(current[i].clone());
                    i += 1;
                } else {
                    buffer.push(current[j].clone());
                    j += 1;
                }
            }
            buffer.extend_from_slice(&current[i..mid]);
            buffer.extend_from_slice(&current[j..end]);
            start = end;
        }
        std::mem::swap(&mut current, &mut buffer);
        width *= 2;
    }
    current
}

/// 原地快速排序（不稳定，比较器需自带 tie-break 才能保证确定性）
pub fn quick_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_slice(items, &mut compare);
}

fn quick_sort_slice<T, F>(items: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }
    let split = hoare_partition(items, compare);
    let (left, right) = items.split_at_mut(split + 1);
    quick_sort_slice(left, compare);
    quick_sort_slice(right, compare);
}

/// Hoare 划分，返回 j 使得 [0..=j] <= pivot <= [j+1..]
fn hoare_partition<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    // 取下中位, 保证 j <= len - 2
    let pivot = items[(items.len() - 1) / 2].clone();
    let mut i = 0;
    let mut j = items.len() - 1;
    loop {
        while compare(&items[i], &pivot) == Ordering::Less {
            i += 1;
        }
        while compare(&items[j], &pivot) == Ordering::Greater {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        items.swap(i, j);
        i += 1;
        j -= 1;
    }
}

// ==========================================
// LotSorter - 批次排序引擎
// ==========================================
pub struct LotSorter {
    // 无状态引擎
}

impl LotSorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 按效期升序（归并排序），同效期按 lot_id
    pub fn sort_by_expiry(&self, lots: &[Lot]) -> Vec<Lot> {
        merge_sort_by(lots, |a, b| {
            a.expiry_days
                .cmp(&b.expiry_days)
                .then_with(|| a.lot_id.cmp(&b.lot_id))
        })
    }

    /// 按已消耗体积降序（快速排序），相同按 lot_id
    pub fn sort_by_consumed_desc(&self, lots: &[Lot]) -> Vec<Lot> {
        let mut sorted = lots.to_vec();
        quick_sort_by(&mut sorted, |a, b| {
            b.consumed_volume()
                .cmp(&a.consumed_volume())
                .then_with(|| a.lot_id.cmp(&b.lot_id))
        });
        sorted
    }

    /// 耗材消耗排名（快速排序）：体积降序，相同按名称
    pub fn rank_consumption(&self, mut totals: Vec<(String, u64)>) -> Vec<(String, u64)> {
        quick_sort_by(&mut totals, |a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        totals
    }
}

impl Default for LotSorter {
    fn default() -> Self {
        Self::new()
    }
}
