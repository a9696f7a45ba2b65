//! 把 `Jisyo` 序列化为 SKK 词典文本。
//!
//! 输出结构：
//! - `;; -*- coding: NAME -*-`
//! - `;; okuri-ari entries.` + 送りあり条目（见出し降序）
//! - `;; okuri-nasi entries.` + 送りなし条目（见出し升序）
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use skk_core::{Jisyo, codec::encode_candidates, entry::Entry};

use crate::{
    encoding::Encoding,
    error::{JisyoError, Result},
};

/// 写出选项。
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// 输出编码（默认 UTF-8）
    pub encoding: Encoding,
}

impl WriteOptions {
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// 单个条目的输出行（含换行）。
pub fn entry_line(entry: &Entry) -> String {
    let mut line = String::new();
    line.push_str(entry.midashi());
    line.push(' ');
    line.push_str(&encode_candidates(entry.candidates()));
    line.push('\n');
    line
}

/// 逐行输出（UTF-8 文本），header 中声明 `encoding`。
fn lines(jisyo: &Jisyo, encoding: Encoding) -> impl Iterator<Item = String> + '_ {
    let header = [
        format!(";; -*- coding: {encoding} -*-\n"),
        ";; okuri-ari entries.\n".to_string(),
    ];
    header
        .into_iter()
        .chain(jisyo.okuri_ari_entries().map(entry_line))
        .chain(std::iter::once(";; okuri-nasi entries.\n".to_string()))
        .chain(jisyo.okuri_nashi_entries().map(entry_line))
}

/// 序列化为 UTF-8 字符串（coding 声明为 utf-8）。
pub fn to_string(jisyo: &Jisyo) -> String {
    lines(jisyo, Encoding::Utf8).collect()
}

/// 写入任意 `Write`；首个失败即返回。
pub fn write<W: Write>(jisyo: &Jisyo, writer: W, options: &WriteOptions) -> Result<()> {
    let encoding = options.encoding;
    let codec = encoding.codec();
    let mut w = BufWriter::new(writer);
    for line in lines(jisyo, encoding) {
        if encoding == Encoding::Utf8 {
            w.write_all(line.as_bytes())?;
            continue;
        }
        let (bytes, _, unmappable) = codec.encode(&line);
        if unmappable {
            return Err(JisyoError::Unmappable {
                encoding,
                text: line.trim_end().to_string(),
            });
        }
        w.write_all(&bytes)?;
    }
    w.flush()?;
    Ok(())
}

/// 写入文件（存在则截断）。
pub fn write_file(jisyo: &Jisyo, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| JisyoError::File {
        path: path.to_path_buf(),
        source,
    })?;
    write(jisyo, file, options)
}
