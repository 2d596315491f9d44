//! 规则模块：规则文档的构造、校验与快照引导
pub mod bootstrap;
pub mod document;

// 导出核心接口
pub use self::bootstrap::{
    MemorySnapshotStore, SnapshotStore, bootstrap_from_snapshot, decode_snapshot, encode_snapshot,
};
pub use self::document::{DocumentState, RuleDocument};
