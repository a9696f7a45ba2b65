//! 读写词典时的错误类型。

use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::Encoding;

#[derive(Debug, Error)]
pub enum JisyoError {
    /// 底层 I/O 错误。
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 打开/创建文件失败（带路径）。
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 输出编码无法表示某个候选/见出し中的字符。
    #[error("cannot encode {text:?} as {encoding}")]
    Unmappable { encoding: Encoding, text: String },

    /// 不认识的编码名。
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}

pub type Result<T> = std::result::Result<T, JisyoError>;
