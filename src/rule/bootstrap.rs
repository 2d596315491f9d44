//! 快照引导
//! 新规则下发之前，用持久化快照中的规则文档预先填充，并标记为快照加载
//! 快照统一使用 MessagePack 编码

use rmp_serde::{from_slice, to_vec_named};
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use super::document::RuleDocument;
use crate::config::RuleConfig;
use crate::core::{RawRuleDocument, RuleKind, ServiceKey};
use crate::error::{RuleError, RuleResult};

/// 快照存储（外部协作方）
pub trait SnapshotStore: Send + Sync {
    /// 读取指定服务、指定规则类型的快照；不存在时返回 None
    fn load(&self, key: &ServiceKey, kind: RuleKind) -> RuleResult<Option<RawRuleDocument>>;
}

/// 将原始规则文档编码为快照
pub fn encode_snapshot(raw: &RawRuleDocument) -> RuleResult<Vec<u8>> {
    let bytes = to_vec_named(raw)?;
    debug!("Snapshot encoded | Service: {} | Size: {} bytes", raw.service_key(), bytes.len());
    Ok(bytes)
}

/// 从快照解码原始规则文档
pub fn decode_snapshot(bytes: &[u8]) -> RuleResult<RawRuleDocument> {
    Ok(from_slice(bytes)?)
}

/// 进程内快照存储，保存编码后的快照字节
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<FxHashMap<(ServiceKey, RuleKind), Vec<u8>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存快照，同一服务同一类型只保留最新一份
    pub fn save(&self, raw: &RawRuleDocument) -> RuleResult<()> {
        let kind = RuleKind::try_from(raw.doc_type)?;
        let bytes = encode_snapshot(raw)?;
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((raw.service_key(), kind), bytes);
        Ok(())
    }

    pub fn remove(&self, key: &ServiceKey, kind: RuleKind) -> bool {
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(key.clone(), kind))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &ServiceKey, kind: RuleKind) -> RuleResult<Option<RawRuleDocument>> {
        let cache_read = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        cache_read
            .get(&(key.clone(), kind))
            .map(|bytes| decode_snapshot(bytes))
            .transpose()
    }
}

/// 从快照引导规则文档：读取 → 构造 → 校验 → 发布 → 标记快照加载
/// 快照中没有该服务的规则时返回 Ok(None)
/// 校验失败的文档同样返回，错误记录在文档上
pub fn bootstrap_from_snapshot(
    store: &dyn SnapshotStore,
    key: &ServiceKey,
    kind: RuleKind,
    config: &RuleConfig,
) -> RuleResult<Option<Arc<RuleDocument>>> {
    let Some(raw) = store.load(key, kind)? else {
        debug!("No snapshot found | Service: {} | Kind: {}", key, kind);
        return Ok(None);
    };

    let snapshot_kind = RuleKind::try_from(raw.doc_type)?;
    if snapshot_kind != kind {
        return Err(RuleError::SnapshotError(format!(
            "snapshot for {} holds {} rules, expected {}",
            key, snapshot_kind, kind
        )));
    }

    let doc = RuleDocument::build(Some(&raw), config)?;
    if let Some(e) = doc.validation_error() {
        warn!("Snapshot rule document invalid | Service: {} | Error: {}", key, e);
    }
    doc.mark_loaded_from_snapshot();
    debug!(
        "Rule document bootstrapped from snapshot | Service: {} | Kind: {} | Revision: {}",
        key,
        kind,
        doc.revision()
    );
    Ok(Some(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DocumentType;
    use crate::rule::DocumentState;
    use serde_json::json;

    fn key() -> ServiceKey {
        ServiceKey::new("Production", "order")
    }

    fn rate_limit_raw() -> RawRuleDocument {
        RawRuleDocument::rate_limit(
            &key(),
            json!({
                "revision": "snap-3",
                "rules": [{
                    "id": "r1",
                    "labels": { "uid": { "type": "REGEX", "value": "^vip-" } },
                    "amounts": [{ "maxAmount": 100, "validDuration": "1s" }]
                }]
            }),
        )
    }

    #[test]
    fn test_snapshot_codec_preserves_document() {
        let raw = rate_limit_raw();
        let decoded = decode_snapshot(&encode_snapshot(&raw).unwrap()).unwrap();
        assert_eq!(decoded, raw);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_snapshot(&[0xc1, 0x00]).unwrap_err();
        assert!(matches!(err, RuleError::SnapshotError(_)));
    }

    #[test]
    fn test_bootstrap_marks_snapshot_loaded() {
        let store = MemorySnapshotStore::new();
        store.save(&rate_limit_raw()).unwrap();

        let doc = bootstrap_from_snapshot(&store, &key(), RuleKind::RateLimiting, &RuleConfig::default())
            .unwrap()
            .unwrap();
        assert!(doc.is_loaded_from_snapshot());
        assert_eq!(doc.revision(), "snap-3");
        assert_eq!(doc.state(), DocumentState::Valid);
        assert!(doc.matcher_cache().contains("^vip-"));
    }

    #[test]
    fn test_bootstrap_missing_snapshot() {
        let store = MemorySnapshotStore::new();
        let doc = bootstrap_from_snapshot(&store, &key(), RuleKind::Routing, &RuleConfig::default())
            .unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_bootstrap_invalid_snapshot_still_returned() {
        let store = MemorySnapshotStore::new();
        let raw = RawRuleDocument::routing(
            &key(),
            json!({ "inbounds": [{ "sources": [{ "metadata": { "p": { "type": "REGEX", "value": "(" } } }] }] }),
        );
        store.save(&raw).unwrap();

        let doc = bootstrap_from_snapshot(&store, &key(), RuleKind::Routing, &RuleConfig::default())
            .unwrap()
            .unwrap();
        assert!(doc.is_loaded_from_snapshot());
        assert_eq!(doc.state(), DocumentState::Invalid);
    }

    #[derive(Debug)]
    struct MislabeledStore;

    impl SnapshotStore for MislabeledStore {
        fn load(&self, key: &ServiceKey, _kind: RuleKind) -> RuleResult<Option<RawRuleDocument>> {
            Ok(Some(RawRuleDocument::routing(key, json!({}))))
        }
    }

    #[test]
    fn test_bootstrap_kind_mismatch() {
        let err = bootstrap_from_snapshot(&MislabeledStore, &key(), RuleKind::RateLimiting, &RuleConfig::default())
            .unwrap_err();
        assert!(matches!(err, RuleError::SnapshotError(_)));
    }

    #[test]
    fn test_store_rejects_non_rule_document() {
        let store = MemorySnapshotStore::new();
        let raw = RawRuleDocument {
            doc_type: DocumentType::Services,
            ..RawRuleDocument::default()
        };
        assert!(matches!(store.save(&raw), Err(RuleError::UnknownRuleKind(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_keeps_latest_and_removes() {
        let store = MemorySnapshotStore::new();
        store.save(&rate_limit_raw()).unwrap();
        store.save(&rate_limit_raw()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.remove(&key(), RuleKind::RateLimiting));
        assert!(!store.remove(&key(), RuleKind::RateLimiting));
    }
}
