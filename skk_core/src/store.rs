//! `store`：单个分区的有序条目集合。
//!
//! 两个分区排序方向相反（SKK 词典格式约定）：
//! - 送りあり：见出し语降序
//! - 送りなし：见出し语升序
//!
//! 底层统一用 `BTreeMap<String, Entry>`（升序），遍历时按 `Order` 决定方向。
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::iter::Rev;
use std::ops::Bound;

use crate::entry::Entry;

/// 分区的原生遍历方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// 按原生方向遍历条目的迭代器。
pub enum Iter<'a> {
    Ascending(btree_map::Values<'a, String, Entry>),
    Descending(Rev<btree_map::Values<'a, String, Entry>>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        match self {
            Iter::Ascending(it) => it.next(),
            Iter::Descending(it) => it.next(),
        }
    }
}

/// 单个分区：见出し语 -> 条目。
#[derive(Debug, Clone)]
pub struct Partition {
    order: Order,
    entries: BTreeMap<String, Entry>,
}

impl Partition {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 精确查找。
    pub fn get(&self, midashi: &str) -> Option<&Entry> {
        self.entries.get(midashi)
    }

    pub fn get_mut(&mut self, midashi: &str) -> Option<&mut Entry> {
        self.entries.get_mut(midashi)
    }

    /// 返回已有条目，不存在时插入一个空条目。
    pub fn upsert(&mut self, midashi: &str) -> &mut Entry {
        self.entries
            .entry(midashi.to_owned())
            .or_insert_with(|| Entry::new(midashi))
    }

    pub fn delete(&mut self, midashi: &str) -> Option<Entry> {
        self.entries.remove(midashi)
    }

    /// 按原生方向完整遍历（序列化用）。
    pub fn iter(&self) -> Iter<'_> {
        match self.order {
            Order::Ascending => Iter::Ascending(self.entries.values()),
            Order::Descending => Iter::Descending(self.entries.values().rev()),
        }
    }

    /// 对每个条目执行 `f`，并删除执行后变为空的条目。返回删除数量。
    pub fn retain_non_empty(&mut self, mut f: impl FnMut(&mut Entry)) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| {
            f(e);
            !e.is_empty()
        });
        before - self.entries.len()
    }

    /// 前缀扫描：按原生方向返回所有以 `prefix` 开头的条目。
    ///
    /// 同前缀的 key 在字典序上连续，且都落在 `[prefix, prefix + char::MAX)` 内；
    /// 扫描遇到第一个不匹配的 key 即停止。
    pub fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        let mut upper = String::with_capacity(prefix.len() + 4);
        upper.push_str(prefix);
        upper.push(char::MAX);
        let range = self
            .entries
            .range::<str, _>((Bound::Included(prefix), Bound::Excluded(upper.as_str())));
        let scan: Box<dyn Iterator<Item = (&'a String, &'a Entry)> + 'a> = match self.order {
            Order::Ascending => Box::new(range),
            Order::Descending => Box::new(range.rev()),
        };
        scan.take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(_, e)| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Candidate;

    fn filled(order: Order, keys: &[&str]) -> Partition {
        let mut p = Partition::new(order);
        for k in keys {
            p.upsert(k).add_candidate(&Candidate::plain("x"), ",");
        }
        p
    }

    fn keys<'a>(it: impl Iterator<Item = &'a Entry>) -> Vec<&'a str> {
        it.map(Entry::midashi).collect()
    }

    #[test]
    fn iterates_in_native_direction() {
        let asc = filled(Order::Ascending, &["かき", "あい", "あか"]);
        assert_eq!(keys(asc.iter()), vec!["あい", "あか", "かき"]);

        let desc = filled(Order::Descending, &["あr", "かk", "いs"]);
        assert_eq!(keys(desc.iter()), vec!["かk", "いs", "あr"]);
    }

    #[test]
    fn upsert_returns_existing_entry() {
        let mut p = Partition::new(Order::Ascending);
        p.upsert("あ").add_candidate(&Candidate::plain("亜"), ",");
        p.upsert("あ").add_candidate(&Candidate::plain("阿"), ",");
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("あ").map(|e| e.candidates().len()), Some(2));
    }

    #[test]
    fn delete_removes_entry() {
        let mut p = filled(Order::Ascending, &["あ", "い"]);
        assert!(p.delete("あ").is_some());
        assert!(p.delete("あ").is_none());
        assert!(p.get("あ").is_none());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn prefix_scan_stops_at_first_mismatch() {
        let p = filled(Order::Ascending, &["あい", "あう", "あか", "かき", "あ"]);
        assert_eq!(keys(p.prefixed("あ")), vec!["あ", "あい", "あう", "あか"]);
        assert_eq!(keys(p.prefixed("か")), vec!["かき"]);
        assert!(keys(p.prefixed("z")).is_empty());
        assert_eq!(keys(p.prefixed("")).len(), 5);
    }

    #[test]
    fn prefix_scan_descending_is_reversed() {
        let p = filled(Order::Descending, &["あr", "あk", "いk"]);
        assert_eq!(keys(p.prefixed("あ")), vec!["あr", "あk"]);
    }

    #[test]
    fn retain_non_empty_drops_emptied_entries() {
        let mut p = filled(Order::Ascending, &["あ", "い", "う"]);
        let removed = p.retain_non_empty(|e| {
            if e.midashi() != "い" {
                e.remove_candidate("x");
            }
        });
        assert_eq!(removed, 2);
        assert_eq!(keys(p.iter()), vec!["い"]);
    }
}
