//! `skk_core`：SKK 辞書的纯逻辑层，不做任何 I/O。
//!
//! 分层：
//! - `codec`：候选列表行内语法的解析/序列化
//! - `okuri`：见出し语分区判定（送りあり / 送りなし）
//! - `entry` / `store`：条目与有序分区
//! - `merge`：并集 / 差集 / 交集
//! - `jisyo`：对外的词典对象；`dictionary`：前端使用的查询抽象
pub mod codec;
pub mod dictionary;
pub mod entry;
pub mod jisyo;
pub mod merge;
pub mod model;
pub mod okuri;
pub mod store;

pub use dictionary::Dictionary;
pub use jisyo::{Intersection, Jisyo};
pub use merge::MergeMode;
pub use model::Candidate;
