//! `skk_dict`：SKK 词典文件的读写层（编码判断/转码、按合并模式读入、序列化写出）。
//!
//! 纯逻辑（解析、分区、合并）都在 `skk_core`，这里只负责字节与文本之间的转换。
pub mod encoding;
pub mod error;
pub mod reader;
pub mod writer;

pub use encoding::Encoding;
pub use error::{JisyoError, Result};
pub use reader::{ReadOptions, ReadSummary, read, read_file};
pub use writer::{WriteOptions, to_string, write, write_file};
