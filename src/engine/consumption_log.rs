// ==========================================
// 病理实验室耗材管理 - 消耗日志
// ==========================================
// 职责: 按时间顺序记录每日规划结果
// 视图: 队列（FIFO, 最早优先）/ 栈（LIFO, 最新优先）
// 红线: 两种视图共享同一份存储, 不复制记录
// ==========================================

use crate::domain::consumption::ConsumptionRecord;
use crate::domain::plan::{DayPlan, Plan};
use chrono::Utc;
use std::iter::Rev;
use std::slice::Iter;

#[derive(Debug, Clone, Default)]
pub struct ConsumptionLog {
    records: Vec<ConsumptionRecord>,
}

impl ConsumptionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条单日记录
    pub fn record(&mut self, item_name: &str, day: &DayPlan) -> &ConsumptionRecord {
        let sequence_no = self.records.len() as u64 + 1;
        let record = ConsumptionRecord::from_day_plan(
            sequence_no,
            item_name,
            day,
            Utc::now().naive_utc(),
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// 按天顺序追加整个方案
    pub fn record_plan(&mut self, plan: &Plan) {
        for day in &plan.days {
            self.record(&plan.item_name, day);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 队列视图：最早的记录在前
    pub fn fifo(&self) -> Iter<'_, ConsumptionRecord> {
        self.records.iter()
    }

    /// 栈视图：最新的记录在前
    pub fn lifo(&self) -> Rev<Iter<'_, ConsumptionRecord>> {
        self.records.iter().rev()
    }

    /// 队列游标（出队语义）
    pub fn fifo_cursor(&self) -> FifoCursor<'_> {
        FifoCursor {
            records: &self.records,
            head: 0,
        }
    }

    /// 栈游标（出栈语义）
    pub fn lifo_cursor(&self) -> LifoCursor<'_> {
        LifoCursor {
            records: &self.records,
            top: self.records.len(),
        }
    }

    pub fn records_for<'a>(&'a self, item_name: &'a str) -> impl Iterator<Item = &'a ConsumptionRecord> + 'a {
        self.records.iter().filter(move |r| r.item_name == item_name)
    }

    /// 最新的 n 条记录（最新在前）
    pub fn latest(&self, n: usize) -> Vec<&ConsumptionRecord> {
        self.lifo().take(n).collect()
    }
}

// ==========================================
// FifoCursor - 队列游标
// ==========================================
#[derive(Debug, Clone)]
pub struct FifoCursor<'a> {
    records: &'a [ConsumptionRecord],
    head: usize,
}

impl<'a> FifoCursor<'a> {
    /// 出队：返回最早的未读记录
    pub fn dequeue(&mut self) -> Option<&'a ConsumptionRecord> {
        let record = self.records.get(self.head)?;
        self.head += 1;
        Some(record)
    }

    pub fn peek(&self) -> Option<&'a ConsumptionRecord> {
        self.records.get(self.head)
    }

    pub fn remaining(&self) -> usize {
        self.records.len() - self.head
    }
}

impl<'a> Iterator for FifoCursor<'a> {
    type Item = &'a ConsumptionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.dequeue()
    }
}

// ==========================================
// LifoCursor - 栈游标
// ==========================================
#[derive(Debug, Clone)]
pub struct LifoCursor<'a> {
    records: &'a [ConsumptionRecord],
    top: usize,
}

impl<'a> LifoCursor<'a> {
    /// 出栈：返回最新的未读记录
    pub fn pop(&mut self) -> Option<&'a ConsumptionRecord> {
        if self.top == 0 {
            return None;
        }
        self.top -= 1;
        self.records.get(self.top)
    }

    pub fn peek(&self) -> Option<&'a ConsumptionRecord> {
        self.top.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub fn remaining(&self) -> usize {
        self.top
    }
}

impl<'a> Iterator for LifoCursor<'a> {
    type Item = &'a ConsumptionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day_index: u32, demand: u64) -> DayPlan {
        DayPlan::empty(day_index, demand, true)
    }

    #[test]
    fn test_sequence_numbers_follow_insertion() {
        let mut log = ConsumptionLog::new();
        log.record("Eosina", &day(1, 20));
        let second = log.record("Eosina", &day(2, 30));
        assert_eq!(second.sequence_no, 2);
        assert_eq!(second.demand, 30);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_cursors_share_storage() {
        let mut log = ConsumptionLog::new();
        for i in 1..=3 {
            log.record("Xileno", &day(i, u64::from(i) * 10));
        }

        let mut queue = log.fifo_cursor();
        let mut stack = log.lifo_cursor();
        assert_eq!(queue.dequeue().map(|r| r.day_index), Some(1));
        assert_eq!(stack.pop().map(|r| r.day_index), Some(3));
        assert_eq!(queue.remaining(), 2);
        assert_eq!(stack.remaining(), 2);
        assert_eq!(queue.peek().map(|r| r.day_index), Some(2));
        assert_eq!(stack.peek().map(|r| r.day_index), Some(2));

        // 两个视图指向同一条记录
        assert!(std::ptr::eq(queue.peek().unwrap(), stack.peek().unwrap()));
        assert_eq!(log.len(), 3);
    }
}
