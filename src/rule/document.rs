//! 规则文档
//! 每次规则更新（每个版本）构造一个实例；校验完成后只读，可通过 Arc 共享给并发读者

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::assistant::{RuleAssistant, assistant_for_document};
use crate::compiler::MatcherCache;
use crate::config::RuleConfig;
use crate::core::{RateLimit, RawRuleDocument, Routing, RuleKind, RulePayload, ServiceKey};
use crate::error::{RuleError, RuleResult};

/// 规则文档生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// 源文档为空
    Uninitialized,
    /// 已抽取，未校验
    Constructed,
    /// 校验通过
    Valid,
    /// 校验失败，规则值不可用于决策，版本号与服务标识仍然有效
    Invalid,
}

#[derive(Debug)]
pub struct RuleDocument {
    service_key: ServiceKey,
    initialized: bool,
    revision: String,
    rule_kind: Option<RuleKind>,
    assistant: Option<&'static dyn RuleAssistant>,
    payload: Option<RulePayload>,
    // 文档独占，不与其他文档共享
    matcher_cache: MatcherCache,
    loaded_from_snapshot: AtomicBool,
    validated: bool,
    // 抽取失败原因，每次校验时重新报告
    extract_error: Option<RuleError>,
    validation_error: Option<RuleError>,
}

impl RuleDocument {
    /// 源文档为空时的文档：所有访问器返回空值，校验为空操作
    pub fn uninitialized() -> Self {
        Self {
            service_key: ServiceKey::default(),
            initialized: false,
            revision: String::new(),
            rule_kind: None,
            assistant: None,
            payload: None,
            matcher_cache: MatcherCache::default(),
            loaded_from_snapshot: AtomicBool::new(false),
            validated: false,
            extract_error: None,
            validation_error: None,
        }
    }

    /// 使用默认配置构造
    ///
    /// # Panics
    /// 文档类型不是规则类型（分发表中没有对应助手）时 panic，这是调用方的编程错误
    pub fn new(raw: Option<&RawRuleDocument>) -> Self {
        Self::with_config(raw, &RuleConfig::default())
    }

    /// # Panics
    /// 同 [`RuleDocument::new`]
    pub fn with_config(raw: Option<&RawRuleDocument>, config: &RuleConfig) -> Self {
        Self::try_new(raw, config).unwrap_or_else(|e| {
            panic!("rule document dispatch failed, non-rule document routed to rule cache: {}", e)
        })
    }

    /// 构造规则文档
    /// 只有 UnknownRuleKind 会以 Err 返回；规则值抽取失败不会中断构造，
    /// 而是生成没有规则值的文档，并在校验时报告 MalformedDocument
    pub fn try_new(raw: Option<&RawRuleDocument>, config: &RuleConfig) -> RuleResult<Self> {
        let Some(raw) = raw else {
            return Ok(Self::uninitialized());
        };
        let assistant = assistant_for_document(raw.doc_type)?;
        let service_key = raw.service_key();

        let (payload, revision, extract_error) = match assistant.extract_payload(raw) {
            Ok((payload, revision)) => (payload, revision, None),
            Err(e) => {
                warn!(
                    "Rule payload extraction failed | Service: {} | Kind: {} | Error: {}",
                    service_key,
                    assistant.kind(),
                    e
                );
                (None, String::new(), Some(e))
            }
        };
        debug!(
            "Rule document constructed | Service: {} | Kind: {} | Revision: {}",
            service_key,
            assistant.kind(),
            revision
        );

        Ok(Self {
            service_key,
            initialized: true,
            revision,
            rule_kind: Some(assistant.kind()),
            assistant: Some(assistant),
            payload,
            matcher_cache: MatcherCache::from_config(config),
            loaded_from_snapshot: AtomicBool::new(false),
            validated: false,
            extract_error,
            validation_error: None,
        })
    }

    /// 构造 + 校验 + 发布
    /// 校验错误记录在文档上，不会中断调用方
    pub fn build(raw: Option<&RawRuleDocument>, config: &RuleConfig) -> RuleResult<Arc<Self>> {
        let mut doc = Self::try_new(raw, config)?;
        if let Err(e) = doc.validate() {
            debug!(
                "Publishing invalid rule document | Service: {} | Error kept on document: {}",
                doc.service_key, e
            );
        }
        Ok(Arc::new(doc))
    }

    /// 补全默认值并校验，构建正则缓存
    /// 结果覆盖写入 validation_error 并返回；可重复调用，结果确定
    /// 未初始化的文档直接返回 Ok(())
    pub fn validate(&mut self) -> RuleResult<()> {
        let Some(assistant) = self.assistant else {
            debug!("Skip validation of uninitialized rule document");
            return Ok(());
        };

        let result = match (&self.extract_error, self.payload.as_mut()) {
            (Some(e), _) => Err(e.clone()),
            (None, Some(payload)) => {
                assistant.set_defaults(payload);
                assistant.validate(payload, &self.matcher_cache)
            }
            (None, None) => Ok(()),
        };

        self.validated = true;
        self.validation_error = result.as_ref().err().cloned();
        match &result {
            Ok(()) => debug!(
                "Rule document validated | Service: {} | Revision: {} | Matchers: {}",
                self.service_key,
                self.revision,
                self.matcher_cache.len()
            ),
            Err(e) => warn!(
                "Rule document invalid | Service: {} | Revision: {} | Error: {}",
                self.service_key, self.revision, e
            ),
        }
        result
    }

    /// 标记规则值来自快照，最多生效一次
    /// 返回本次调用是否完成了标记
    pub fn mark_loaded_from_snapshot(&self) -> bool {
        self.loaded_from_snapshot
            .compare_exchange(false, true, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    /// 规则值是否从快照加载
    pub fn is_loaded_from_snapshot(&self) -> bool {
        self.loaded_from_snapshot.load(Ordering::Acquire)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn namespace(&self) -> &str {
        if self.initialized {
            &self.service_key.namespace
        } else {
            ""
        }
    }

    pub fn service(&self) -> &str {
        if self.initialized {
            &self.service_key.service
        } else {
            ""
        }
    }

    pub fn service_key(&self) -> &ServiceKey {
        &self.service_key
    }

    /// 版本号，用于判断规则是否更新
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// 未初始化时为 None
    pub fn rule_kind(&self) -> Option<RuleKind> {
        self.rule_kind
    }

    pub fn payload(&self) -> Option<&RulePayload> {
        self.payload.as_ref()
    }

    pub fn as_routing(&self) -> Option<&Routing> {
        self.payload.as_ref().and_then(RulePayload::as_routing)
    }

    pub fn as_rate_limit(&self) -> Option<&RateLimit> {
        self.payload.as_ref().and_then(RulePayload::as_rate_limit)
    }

    pub fn matcher_cache(&self) -> &MatcherCache {
        &self.matcher_cache
    }

    /// 最近一次校验的错误；None 表示未校验或校验通过，用 state() 区分
    pub fn validation_error(&self) -> Option<&RuleError> {
        self.validation_error.as_ref()
    }

    pub fn state(&self) -> DocumentState {
        if !self.initialized {
            DocumentState::Uninitialized
        } else if !self.validated {
            DocumentState::Constructed
        } else if self.validation_error.is_some() {
            DocumentState::Invalid
        } else {
            DocumentState::Valid
        }
    }

    /// 规则值可用于决策
    pub fn is_usable(&self) -> bool {
        self.state() == DocumentState::Valid
    }
}
