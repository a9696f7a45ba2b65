//! `codec`：候选列表的行内语法（`/候选1/候选2;注释/.../`）。
//!
//! 约定：
//! - 以第一个控制字符（< 0x20）或输入末尾为终止
//! - `[` 开头的段是跳过块（送り仮名变换信息），扫描到 `]` 为止，不产出候选
//! - 空段不产出候选
//! - 非空段按第一个 `;` 切分为 (text, annotation)
use crate::model::Candidate;

/// 逐段扫描候选列表，产出每个“真实候选”的原始切片（含注释部分）。
struct Segments<'a> {
    bytes: &'a [u8],
    src: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            bytes: src.as_bytes(),
            src,
            pos: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let s = self.bytes;
        while self.pos < s.len() && s[self.pos] >= 0x20 {
            if s[self.pos] != b'/' {
                self.pos += 1;
                continue;
            }
            let start = self.pos + 1;
            let mut end = start;
            if end >= s.len() || s[end] < 0x20 {
                self.pos = s.len();
                return None;
            }
            if s[end] == b'[' {
                while end < s.len() && s[end] != b']' {
                    end += 1;
                }
                self.pos = end;
                continue;
            }
            while end < s.len() && s[end] != b'/' {
                end += 1;
            }
            self.pos = end;
            if start == end {
                continue;
            }
            // '/' '[' ']' 都是 ASCII，切片边界一定落在字符边界上。
            return Some(&self.src[start..end]);
        }
        None
    }
}

/// 统计候选列表中真实候选的数量（不含跳过块与空段）。
pub fn count_candidates(s: &str) -> usize {
    Segments::new(s).count()
}

/// 解析候选列表；没有任何真实候选时返回空 Vec（调用方视为“无条目”）。
pub fn decode_candidates(s: &str) -> Vec<Candidate> {
    let count = count_candidates(s);
    if count == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(count);
    for seg in Segments::new(s) {
        let (text, annotation) = seg.split_once(';').unwrap_or((seg, ""));
        out.push(Candidate::new(text, annotation));
    }
    out
}

/// 序列化候选列表：空列表输出 `//`。
pub fn encode_candidates(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "//".to_string();
    }
    let mut s = String::new();
    for c in candidates {
        s.push('/');
        s.push_str(&c.text);
        if !c.annotation.is_empty() {
            s.push(';');
            s.push_str(&c.annotation);
        }
    }
    s.push('/');
    s
}

/// 解析一行 `見出し /候选/.../`。
///
/// 缺少空格分隔、见出し为空、或没有真实候选时返回 `None`。
/// 注释行（`;` 开头）由调用方负责跳过。
pub fn parse_line(line: &str) -> Option<(&str, Vec<Candidate>)> {
    let (midashi, rest) = line.split_once(' ')?;
    if midashi.is_empty() {
        return None;
    }
    let candidates = decode_candidates(rest);
    if candidates.is_empty() {
        return None;
    }
    Some((midashi, candidates))
}
