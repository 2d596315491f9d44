//! 规则助手：按规则类型抽取、补全默认值、校验规则值
//! 分发表在进程内只初始化一次，之后只读

mod rate_limit;
mod routing;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt::Debug;

use crate::compiler::MatcherCache;
use crate::core::{DocumentType, RawRuleDocument, RuleKind, RulePayload};
use crate::error::{RuleError, RuleResult};

pub use rate_limit::{DEFAULT_RATE_LIMIT_ACTION, RateLimitingAssistant};
pub use routing::{DEFAULT_DESTINATION_WEIGHT, RoutingAssistant};

/// 规则助手接口
pub trait RuleAssistant: Debug + Send + Sync {
    /// 负责的规则类型
    fn kind(&self) -> RuleKind;

    /// 从原始文档中抽取规则值与版本号，不修改任何共享状态
    /// 文档中没有该类型的规则值时返回 (None, "")
    fn extract_payload(&self, raw: &RawRuleDocument) -> RuleResult<(Option<RulePayload>, String)>;

    /// 补全缺省字段，重复调用结果不变
    fn set_defaults(&self, payload: &mut RulePayload);

    /// 校验规则值，并为其中的正则构建匹配器缓存；返回遇到的第一个错误
    fn validate(&self, payload: &RulePayload, cache: &MatcherCache) -> RuleResult<()>;
}

static ROUTING_ASSISTANT: RoutingAssistant = RoutingAssistant;
static RATE_LIMITING_ASSISTANT: RateLimitingAssistant = RateLimitingAssistant;

/// 规则类型 -> 规则助手
static ASSISTANTS: Lazy<FxHashMap<RuleKind, &'static dyn RuleAssistant>> = Lazy::new(|| {
    let mut table: FxHashMap<RuleKind, &'static dyn RuleAssistant> = FxHashMap::default();
    table.insert(RuleKind::Routing, &ROUTING_ASSISTANT);
    table.insert(RuleKind::RateLimiting, &RATE_LIMITING_ASSISTANT);
    table
});

/// 按规则类型查找助手
pub fn assistant_for(kind: RuleKind) -> RuleResult<&'static dyn RuleAssistant> {
    ASSISTANTS
        .get(&kind)
        .copied()
        .ok_or_else(|| RuleError::UnknownRuleKind(kind.to_string()))
}

/// 按下发的文档类型查找助手，非规则类文档返回 UnknownRuleKind
pub fn assistant_for_document(doc_type: DocumentType) -> RuleResult<&'static dyn RuleAssistant> {
    assistant_for(RuleKind::try_from(doc_type)?)
}
