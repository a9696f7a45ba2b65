//! `Jisyo`：对外的词典对象（两个分区 + 注释分隔符）。
//!
//! 调用约定（交集）：
//! - 一次交集折叠 = 若干次 `MergeMode::And` 合并 + 一次 `finalize_intersection`
//! - 推荐用 `begin_intersection` 返回的 guard，`finish`/drop 时自动清理
//! - 清理前不要穿插其他读者；未清理时标记状态对查询不可见但仍然存在
use tracing::debug;

use crate::codec::parse_line;
use crate::dictionary::Dictionary;
use crate::entry::Entry;
use crate::merge::{self, MergeMode};
use crate::model::Candidate;
use crate::okuri::Okuri;
use crate::store::{Iter, Order, Partition};

/// 默认注释分隔符。
pub const DEFAULT_DELIMITER: &str = ",";

/// SKK 词典：送りあり（降序）与送りなし（升序）两个分区。
#[derive(Debug, Clone)]
pub struct Jisyo {
    /// 同一候选注释不同时的拼接分隔符
    delimiter: String,
    okuri_ari: Partition,
    okuri_nashi: Partition,
}

impl Default for Jisyo {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            okuri_ari: Partition::new(Order::Descending),
            okuri_nashi: Partition::new(Order::Ascending),
        }
    }
}

impl Jisyo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置注释分隔符；空串回退到默认值 `,`。
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        self.delimiter = if delimiter.is_empty() {
            DEFAULT_DELIMITER.to_string()
        } else {
            delimiter
        };
        self
    }

    #[cfg(test)]
    fn annotation_delimiter(&self) -> &str {
        &self.delimiter
    }

    fn partition(&self, okuri: Okuri) -> &Partition {
        match okuri {
            Okuri::Ari => &self.okuri_ari,
            Okuri::Nashi => &self.okuri_nashi,
        }
    }

    fn partition_mut(&mut self, okuri: Okuri) -> &mut Partition {
        match okuri {
            Okuri::Ari => &mut self.okuri_ari,
            Okuri::Nashi => &mut self.okuri_nashi,
        }
    }

    /// 按模式合并一组候选。见出し为空或候选为空时什么都不做。
    ///
    /// `MergeMode::And` 只做标记，必须随后调用 `finalize_intersection`。
    pub fn merge(&mut self, midashi: &str, candidates: &[Candidate], mode: MergeMode) {
        if midashi.is_empty() || candidates.is_empty() {
            return;
        }
        let okuri = Okuri::of(midashi);
        match mode {
            MergeMode::Add => {
                let partition = match okuri {
                    Okuri::Ari => &mut self.okuri_ari,
                    Okuri::Nashi => &mut self.okuri_nashi,
                };
                merge::add(partition, midashi, candidates, &self.delimiter);
            }
            MergeMode::Sub => merge::sub(self.partition_mut(okuri), midashi, candidates),
            MergeMode::And => merge::and(self.partition_mut(okuri), midashi, candidates),
        }
    }

    pub fn add_candidates(&mut self, midashi: &str, candidates: &[Candidate]) {
        self.merge(midashi, candidates, MergeMode::Add);
    }

    pub fn sub_candidates(&mut self, midashi: &str, candidates: &[Candidate]) {
        self.merge(midashi, candidates, MergeMode::Sub);
    }

    /// 交集标记；需要配合 `finalize_intersection`。
    pub fn and_candidates(&mut self, midashi: &str, candidates: &[Candidate]) {
        self.merge(midashi, candidates, MergeMode::And);
    }

    /// 解析并合并一行。注释行与格式错误的行被跳过，返回 `false`。
    pub fn merge_line(&mut self, line: &str, mode: MergeMode) -> bool {
        if line.starts_with(';') {
            return false;
        }
        let Some((midashi, candidates)) = parse_line(line) else {
            if !line.is_empty() {
                debug!(line, "skip malformed line");
            }
            return false;
        };
        self.merge(midashi, &candidates, mode);
        true
    }

    /// 交集清理：两个分区内丢弃未标记候选并删除空条目。返回删除的条目数。
    pub fn finalize_intersection(&mut self) -> usize {
        let removed =
            merge::finalize(&mut self.okuri_ari) + merge::finalize(&mut self.okuri_nashi);
        debug!(removed, remaining = self.len(), "intersection finalized");
        removed
    }

    /// 开始一次交集折叠。
    pub fn begin_intersection(&mut self) -> Intersection<'_> {
        Intersection {
            jisyo: self,
            finished: false,
        }
    }

    /// 删除整个见出し语（不论候选）。返回是否存在。
    pub fn remove_entry(&mut self, midashi: &str) -> bool {
        self.partition_mut(Okuri::of(midashi))
            .delete(midashi)
            .is_some()
    }

    pub fn get(&self, midashi: &str) -> Option<&Entry> {
        self.partition(Okuri::of(midashi)).get(midashi)
    }

    /// 送りあり条目（见出し降序）。
    pub fn okuri_ari_entries(&self) -> Iter<'_> {
        self.okuri_ari.iter()
    }

    /// 送りなし条目（见出し升序）。
    pub fn okuri_nashi_entries(&self) -> Iter<'_> {
        self.okuri_nashi.iter()
    }

    pub fn len(&self) -> usize {
        self.okuri_ari.len() + self.okuri_nashi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.okuri_ari.is_empty() && self.okuri_nashi.is_empty()
    }
}

impl Dictionary for Jisyo {
    fn lookup(&self, midashi: &str) -> Option<&[Candidate]> {
        self.get(midashi).map(Entry::candidates)
    }

    fn complete(&self, prefix: &str) -> Vec<String> {
        self.okuri_nashi
            .prefixed(prefix)
            .map(|e| e.midashi().to_string())
            .collect()
    }
}

/// 交集折叠的 guard：持有词典的独占借用，结束时恰好清理一次。
pub struct Intersection<'a> {
    jisyo: &'a mut Jisyo,
    finished: bool,
}

impl Intersection<'_> {
    pub fn and_candidates(&mut self, midashi: &str, candidates: &[Candidate]) {
        self.jisyo.and_candidates(midashi, candidates);
    }

    pub fn and_line(&mut self, line: &str) -> bool {
        self.jisyo.merge_line(line, MergeMode::And)
    }

    /// 结束折叠并清理，返回删除的条目数。
    pub fn finish(mut self) -> usize {
        self.finished = true;
        self.jisyo.finalize_intersection()
    }
}

impl Drop for Intersection<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.jisyo.finalize_intersection();
        }
    }
}
