use std::fmt;

/// 候选词：一个见出し语（midashi）对应的一条变换结果。
///
/// 注意：合并（union/difference/intersection）时只按 `text` 判等，
/// `annotation` 不参与比较。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 候选文本（上屏文本）
    pub text: String,
    /// 注释（`;` 之后的部分），可为空
    pub annotation: String,
}

impl Candidate {
    pub fn new(text: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotation: annotation.into(),
        }
    }

    /// 无注释候选。
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, String::new())
    }

    /// 合并注释：
    /// - 新注释为空：不变
    /// - 原注释为空：直接采用新注释
    /// - 两者相同：不重复
    /// - 否则：`原注释 + delimiter + 新注释`
    pub fn join_annotation(&mut self, annotation: &str, delimiter: &str) {
        if annotation.is_empty() {
            return;
        }
        if self.annotation.is_empty() {
            annotation.clone_into(&mut self.annotation);
        } else if self.annotation != annotation {
            self.annotation.push_str(delimiter);
            self.annotation.push_str(annotation);
        }
    }
}

/// 单个候选的行内表示：`text` 或 `text;annotation`。
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.annotation.is_empty() {
            f.write_str(&self.text)
        } else {
            write!(f, "{};{}", self.text, self.annotation)
        }
    }
}
