//! 读取 SKK 词典并按合并模式折叠进 `Jisyo`。
//!
//! 约定：
//! - 未指定编码时，由首行的 coding 声明决定；没有声明或不认识时按 UTF-8 读取
//! - 逐行解码、逐行合并：中途出现 I/O 错误时，已合并的行保留，不回滚
//! - `MergeMode::And`：一个来源 = 一次交集折叠，来源读完（或中途失败）后立即清理
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use skk_core::{Jisyo, MergeMode};
use tracing::{info, warn};

use crate::{
    encoding::{self, Encoding},
    error::{JisyoError, Result},
};

/// 读取选项。
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// 输入编码；`None` 表示按首行声明自动判断
    pub encoding: Option<Encoding>,
}

impl ReadOptions {
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }
}

/// 一次读取的统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// 实际使用的编码
    pub encoding: Encoding,
    /// 读到的行数（含注释行）
    pub lines: usize,
    /// 成功合并的行数
    pub merged: usize,
    /// 含有非法字节序列（已替换为 U+FFFD）的行数
    pub malformed_bytes: usize,
}

/// 从文件读取。
pub fn read_file(
    jisyo: &mut Jisyo,
    path: impl AsRef<Path>,
    mode: MergeMode,
    options: &ReadOptions,
) -> Result<ReadSummary> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| JisyoError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let summary = read(jisyo, file, mode, options)?;
    info!(
        path = %path.display(),
        ?mode,
        encoding = %summary.encoding,
        merged = summary.merged,
        entries = jisyo.len(),
        "dictionary read"
    );
    Ok(summary)
}

/// 从任意 `Read` 读取，并按 `mode` 合并进 `jisyo`。
pub fn read<R: Read>(
    jisyo: &mut Jisyo,
    reader: R,
    mode: MergeMode,
    options: &ReadOptions,
) -> Result<ReadSummary> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    // 首行先读出来用于编码判断，之后与其余行同样处理
    let n = reader.read_until(b'\n', &mut buf)?;
    let encoding = match options.encoding {
        Some(e) => e,
        None if n > 0 => encoding::detect(&String::from_utf8_lossy(&buf)).unwrap_or_default(),
        None => Encoding::default(),
    };
    let mut summary = ReadSummary {
        encoding,
        ..ReadSummary::default()
    };

    match mode {
        MergeMode::And => {
            let mut fold = jisyo.begin_intersection();
            read_lines(&mut reader, &mut buf, encoding, &mut summary, |line| {
                fold.and_line(line)
            })?;
            fold.finish();
        }
        _ => read_lines(&mut reader, &mut buf, encoding, &mut summary, |line| {
            jisyo.merge_line(line, mode)
        })?,
    }
    if summary.malformed_bytes > 0 {
        warn!(
            %encoding,
            lines = summary.malformed_bytes,
            "malformed byte sequences replaced while decoding"
        );
    }
    Ok(summary)
}

/// `buf` 中已有首行（可能为空，表示 EOF）。
fn read_lines<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    encoding: Encoding,
    summary: &mut ReadSummary,
    mut merge_line: impl FnMut(&str) -> bool,
) -> Result<()> {
    let codec = encoding.codec();
    while !buf.is_empty() {
        {
            let (line, had_errors) = codec.decode_without_bom_handling(strip_line_ending(buf));
            summary.lines += 1;
            if had_errors {
                summary.malformed_bytes += 1;
            }
            if merge_line(&*line) {
                summary.merged += 1;
            }
        }
        buf.clear();
        reader.read_until(b'\n', buf)?;
    }
    Ok(())
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skk_core::Dictionary;

    fn texts(j: &Jisyo, midashi: &str) -> Option<Vec<String>> {
        j.lookup(midashi)
            .map(|cs| cs.iter().map(|c| c.text.clone()).collect())
    }

    #[test]
    fn reads_lines_and_skips_comments() {
        let src = ";; -*- coding: utf-8 -*-\n;; okuri-nasi entries.\nあい /愛/哀/\nbroken\nかき /柿/\n";
        let mut j = Jisyo::new();
        let summary = read(&mut j, src.as_bytes(), MergeMode::Add, &ReadOptions::default()).unwrap();
        assert_eq!(summary.lines, 5);
        assert_eq!(summary.merged, 2);
        assert_eq!(summary.encoding, Encoding::Utf8);
        assert_eq!(texts(&j, "あい"), Some(vec!["愛".to_string(), "哀".to_string()]));
    }

    #[test]
    fn last_line_without_newline_and_crlf() {
        let src = "あ /亜/\r\nい /胃/";
        let mut j = Jisyo::new();
        read(&mut j, src.as_bytes(), MergeMode::Add, &ReadOptions::default()).unwrap();
        assert_eq!(texts(&j, "あ"), Some(vec!["亜".to_string()]));
        assert_eq!(texts(&j, "い"), Some(vec!["胃".to_string()]));
    }

    #[test]
    fn empty_input_reads_nothing() {
        let mut j = Jisyo::new();
        let summary = read(&mut j, &b""[..], MergeMode::Add, &ReadOptions::default()).unwrap();
        assert_eq!(summary.lines, 0);
        assert!(j.is_empty());
    }

    #[test]
    fn and_mode_finalizes_at_end_of_source() {
        let mut j = Jisyo::new();
        read(&mut j, "あ /候補1/候補2/\nい /胃/\n".as_bytes(), MergeMode::Add, &ReadOptions::default()).unwrap();
        read(&mut j, "あ /候補2/候補3/\n".as_bytes(), MergeMode::And, &ReadOptions::default()).unwrap();
        assert_eq!(texts(&j, "あ"), Some(vec!["候補2".to_string()]));
        assert_eq!(texts(&j, "い"), None);
    }

    #[test]
    fn declared_encoding_is_used() {
        let (body, _, _) = encoding_rs::EUC_JP.encode(";; -*- coding: euc-jp -*-\nかんじ /漢字/\n");
        let mut j = Jisyo::new();
        let summary = read(&mut j, &body[..], MergeMode::Add, &ReadOptions::default()).unwrap();
        assert_eq!(summary.encoding, Encoding::EucJp);
        assert_eq!(summary.malformed_bytes, 0);
        assert_eq!(texts(&j, "かんじ"), Some(vec!["漢字".to_string()]));
    }

    #[test]
    fn explicit_encoding_overrides_declaration() {
        let (body, _, _) = encoding_rs::SHIFT_JIS.encode(";; -*- coding: euc-jp -*-\nかな /仮名/\n");
        let mut j = Jisyo::new();
        let options = ReadOptions::default().encoding(Encoding::ShiftJis);
        read(&mut j, &body[..], MergeMode::Add, &options).unwrap();
        assert_eq!(texts(&j, "かな"), Some(vec!["仮名".to_string()]));
    }

    #[test]
    fn strip_line_ending_variants() {
        assert_eq!(strip_line_ending(b"a\r\n"), b"a");
        assert_eq!(strip_line_ending(b"a\n"), b"a");
        assert_eq!(strip_line_ending(b"a"), b"a");
        assert_eq!(strip_line_ending(b"\n"), b"");
    }
}
