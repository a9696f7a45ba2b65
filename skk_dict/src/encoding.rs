//! 词典文件编码：名称解析、`-*- coding: NAME -*-` 声明识别、与 `encoding_rs` 的对应。
use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use tracing::warn;

use crate::error::JisyoError;

/// `;; -*- coding: euc-jp -*-` 形式的编码声明。
static CODING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-\*-.*[ \t]coding:[ \t]*([^ \t;]+?)[ \t;].*-\*-").expect("valid coding pattern")
});

/// 支持的词典编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    EucJp,
    /// 使用 EUC-JP 编解码（JIS X 0213 扩展字符不在其范围内）
    EucJis2004,
    ShiftJis,
    Iso2022Jp,
    #[default]
    Utf8,
}

impl Encoding {
    pub const ALL: [Encoding; 5] = [
        Encoding::EucJp,
        Encoding::EucJis2004,
        Encoding::ShiftJis,
        Encoding::Iso2022Jp,
        Encoding::Utf8,
    ];

    /// 规范名（写入 coding 声明用）。
    pub fn name(self) -> &'static str {
        match self {
            Encoding::EucJp => "euc-jp",
            Encoding::EucJis2004 => "euc-jis-2004",
            Encoding::ShiftJis => "shift_jis",
            Encoding::Iso2022Jp => "iso-2022-jp",
            Encoding::Utf8 => "utf-8",
        }
    }

    /// 对应的 `encoding_rs` 编解码器。
    pub fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::EucJp | Encoding::EucJis2004 => encoding_rs::EUC_JP,
            Encoding::ShiftJis => encoding_rs::SHIFT_JIS,
            Encoding::Iso2022Jp => encoding_rs::ISO_2022_JP,
            Encoding::Utf8 => encoding_rs::UTF_8,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = JisyoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| JisyoError::UnknownEncoding(s.to_string()))
    }
}

/// 从首行提取 coding 声明。
///
/// - 没有声明：`None`
/// - 声明了不认识的编码：`None`（按未转码处理），并记录 warn
pub fn detect(line: &str) -> Option<Encoding> {
    let name = CODING_PATTERN.captures(line)?.get(1)?.as_str();
    match name.parse() {
        Ok(e) => Some(e),
        Err(_) => {
            warn!(name, "unknown coding declaration, reading without transcoding");
            None
        }
    }
}
