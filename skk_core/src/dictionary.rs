use crate::model::Candidate;

/// 词典查询抽象：前端（REPL/IME）只依赖查询能力，不关心词典如何合并而来。
///
/// 约定：
/// - `lookup` 是精确匹配，分区由见出し语自动判定
/// - `complete` 只覆盖送りなし见出し，结果按升序
pub trait Dictionary {
    /// 查询见出し语对应的候选列表；不存在时返回 `None`。
    fn lookup(&self, midashi: &str) -> Option<&[Candidate]>;

    /// 列出以 `prefix` 开头的送りなし见出し语。
    fn complete(&self, prefix: &str) -> Vec<String>;

    /// 是否存在该见出し语（默认走 `lookup`）。
    fn contains(&self, midashi: &str) -> bool {
        self.lookup(midashi).is_some()
    }
}
