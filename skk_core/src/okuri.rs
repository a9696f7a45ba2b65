//! `okuri`：见出し语的分区判定（送りあり / 送りなし）。

/// 条目所属分区。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Okuri {
    /// 送りあり：非 ASCII 词干 + 小写罗马字送り标记（例如 `おくr`）
    Ari,
    /// 送りなし：其余全部
    Nashi,
}

impl Okuri {
    /// 按见出し语文本判定分区（纯函数）。
    pub fn of(midashi: &str) -> Self {
        if is_okuri_ari(midashi) {
            Okuri::Ari
        } else {
            Okuri::Nashi
        }
    }
}

/// 判定见出し语是否为送りあり。
///
/// - 允许一个前导 `>` 或 `#` 标记（接尾辞/数值见出し），先剥离
/// - 剥离后首字符是 ASCII（或为空）：送りなし
/// - 否则只要剩余部分含有 `a`-`z` 即为送りあり
pub fn is_okuri_ari(midashi: &str) -> bool {
    let s = midashi.strip_prefix(['>', '#']).unwrap_or(midashi);
    match s.chars().next() {
        Some(first) if !first.is_ascii() => s.bytes().any(|b| b.is_ascii_lowercase()),
        _ => false,
    }
}
