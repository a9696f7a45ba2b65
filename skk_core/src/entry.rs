use std::collections::HashSet;

use crate::model::Candidate;

/// 词典条目：一个见出し语及其去重后的候选列表。
///
/// 约定：
/// - `candidates` 内 `text` 唯一，顺序为首次出现顺序
/// - `and_marks` 只在 intersection 折叠期间非空，`finalize_intersection` 后清空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    midashi: String,
    candidates: Vec<Candidate>,
    and_marks: Option<HashSet<String>>,
}

impl Entry {
    pub fn new(midashi: impl Into<String>) -> Self {
        Self {
            midashi: midashi.into(),
            candidates: Vec::new(),
            and_marks: None,
        }
    }

    pub fn midashi(&self) -> &str {
        &self.midashi
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn position(&self, text: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.text == text)
    }

    /// 追加候选；同 text 已存在时只合并注释。
    pub fn add_candidate(&mut self, candidate: &Candidate, delimiter: &str) {
        match self.position(&candidate.text) {
            Some(i) => self.candidates[i].join_annotation(&candidate.annotation, delimiter),
            None => self.candidates.push(candidate.clone()),
        }
    }

    /// 越界时什么都不做。
    pub fn remove_candidate_at(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.candidates.remove(index);
        }
    }

    /// 删除第一个 text 相同的候选。
    pub fn remove_candidate(&mut self, text: &str) {
        if let Some(i) = self.position(text) {
            self.remove_candidate_at(i);
        }
    }

    /// 标记本条目中存在的候选，供 `finalize_intersection` 保留。
    pub fn mark_intersection(&mut self, text: &str) {
        if let Some(i) = self.position(text) {
            let text = self.candidates[i].text.clone();
            self.and_marks.get_or_insert_with(HashSet::new).insert(text);
        }
    }

    /// 丢弃所有未被标记的候选，并清空标记。之后条目可能为空。
    pub fn finalize_intersection(&mut self) {
        match self.and_marks.take() {
            Some(marks) => self.candidates.retain(|c| marks.contains(&c.text)),
            None => self.candidates.clear(),
        }
    }

    #[cfg(test)]
    fn has_intersection_marks(&self) -> bool {
        self.and_marks.as_ref().is_some_and(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(e: &Entry) -> Vec<&str> {
        e.candidates().iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn add_deduplicates_by_text_and_joins_annotation() {
        let mut e = Entry::new("さしみ");
        e.add_candidate(&Candidate::new("刺身", "sashimi"), ",");
        e.add_candidate(&Candidate::plain("差し身"), ",");
        e.add_candidate(&Candidate::new("刺身", "raw fish"), ";;");
        assert_eq!(texts(&e), vec!["刺身", "差し身"]);
        assert_eq!(e.candidates()[0].annotation, "sashimi;;raw fish");
    }

    #[test]
    fn remove_by_text_and_index() {
        let mut e = Entry::new("あ");
        for t in ["亜", "阿", "吾"] {
            e.add_candidate(&Candidate::plain(t), ",");
        }
        e.remove_candidate("阿");
        assert_eq!(texts(&e), vec!["亜", "吾"]);
        e.remove_candidate("無い");
        e.remove_candidate_at(5);
        assert_eq!(texts(&e), vec!["亜", "吾"]);
        e.remove_candidate_at(0);
        assert_eq!(texts(&e), vec!["吾"]);
    }

    #[test]
    fn finalize_keeps_only_marked() {
        let mut e = Entry::new("あ");
        for t in ["候補1", "候補2", "候補3"] {
            e.add_candidate(&Candidate::plain(t), ",");
        }
        e.mark_intersection("候補3");
        e.mark_intersection("候補1");
        e.mark_intersection("候補9");
        assert!(e.has_intersection_marks());
        e.finalize_intersection();
        assert_eq!(texts(&e), vec!["候補1", "候補3"]);
        assert!(!e.has_intersection_marks());
    }

    #[test]
    fn finalize_without_marks_empties_entry() {
        let mut e = Entry::new("あ");
        e.add_candidate(&Candidate::plain("亜"), ",");
        e.mark_intersection("無い");
        e.finalize_intersection();
        assert!(e.is_empty());
    }
}
