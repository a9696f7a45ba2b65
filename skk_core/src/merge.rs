//! `merge`：把一行（见出し + 候选列表）合并进分区的三种模式。
//!
//! - `Add`：并集，注释按 delimiter 拼接
//! - `Sub`：差集，条目变空即删除
//! - `And`：交集，只做标记；整个来源处理完后由 `finalize` 统一清理
use crate::model::Candidate;
use crate::store::Partition;

/// 合并模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    #[default]
    Add,
    Sub,
    And,
}

impl MergeMode {
    /// 命令行表达式里的运算符：`+` / `-` / `^`。
    pub fn from_operator(op: char) -> Option<Self> {
        match op {
            '+' => Some(MergeMode::Add),
            '-' => Some(MergeMode::Sub),
            '^' => Some(MergeMode::And),
            _ => None,
        }
    }
}

/// 并集：不存在则新建条目，逐个追加候选。
pub fn add(partition: &mut Partition, midashi: &str, candidates: &[Candidate], delimiter: &str) {
    let entry = partition.upsert(midashi);
    for c in candidates {
        entry.add_candidate(c, delimiter);
    }
}

/// 差集：条目不存在时什么都不做；一旦条目变空立即删除并停止。
pub fn sub(partition: &mut Partition, midashi: &str, candidates: &[Candidate]) {
    let Some(entry) = partition.get_mut(midashi) else {
        return;
    };
    for c in candidates {
        entry.remove_candidate(&c.text);
        if entry.is_empty() {
            partition.delete(midashi);
            return;
        }
    }
}

/// 交集（标记阶段）：条目不存在视为该来源不含此见出し，什么都不做。
pub fn and(partition: &mut Partition, midashi: &str, candidates: &[Candidate]) {
    let Some(entry) = partition.get_mut(midashi) else {
        return;
    };
    for c in candidates {
        entry.mark_intersection(&c.text);
    }
}

/// 交集（清理阶段）：丢弃未标记候选，删除变空的条目。返回删除的条目数。
pub fn finalize(partition: &mut Partition) -> usize {
    partition.retain_non_empty(|e| e.finalize_intersection())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Order;

    fn cands(texts: &[&str]) -> Vec<Candidate> {
        texts.iter().map(|t| Candidate::plain(*t)).collect()
    }

    fn texts(p: &Partition, midashi: &str) -> Option<Vec<String>> {
        p.get(midashi)
            .map(|e| e.candidates().iter().map(|c| c.text.clone()).collect())
    }

    #[test]
    fn operators() {
        assert_eq!(MergeMode::from_operator('+'), Some(MergeMode::Add));
        assert_eq!(MergeMode::from_operator('-'), Some(MergeMode::Sub));
        assert_eq!(MergeMode::from_operator('^'), Some(MergeMode::And));
        assert_eq!(MergeMode::from_operator('x'), None);
        assert_eq!(MergeMode::default(), MergeMode::Add);
    }

    #[test]
    fn sub_stops_once_entry_is_empty() {
        let mut p = Partition::new(Order::Ascending);
        add(&mut p, "あ", &cands(&["候補1"]), ",");
        sub(&mut p, "あ", &cands(&["候補1", "候補2"]));
        assert!(p.get("あ").is_none());

        // 不存在的条目
        sub(&mut p, "い", &cands(&["x"]));
        assert!(p.is_empty());
    }

    #[test]
    fn and_marks_then_finalize() {
        let mut p = Partition::new(Order::Ascending);
        add(&mut p, "あ", &cands(&["候補1", "候補2"]), ",");
        add(&mut p, "い", &cands(&["胃"]), ",");
        and(&mut p, "あ", &cands(&["候補2", "候補3"]));
        and(&mut p, "う", &cands(&["宇"]));
        assert!(p.get("う").is_none());

        let removed = finalize(&mut p);
        assert_eq!(removed, 1);
        assert_eq!(texts(&p, "あ"), Some(vec!["候補2".to_string()]));
        assert_eq!(texts(&p, "い"), None);
    }
}
