//! 外部协作方
//!
//! AI 分析、文件存储与通知出口都是尽力而为的外部能力，
//! 失败不影响生命周期操作本身。

pub mod analysis;
pub mod file_store;
pub mod notify;
