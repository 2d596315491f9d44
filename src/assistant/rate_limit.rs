use serde::Deserialize;
use tracing::warn;

use super::RuleAssistant;
use crate::compiler::{MatcherCache, build_from_metadata};
use crate::core::{LimitResource, LimitType, RateLimit, RawRuleDocument, RuleKind, RulePayload};
use crate::error::{RuleError, RuleResult};

/// 未配置限流动作时使用拒绝策略
pub const DEFAULT_RATE_LIMIT_ACTION: &str = "reject";

/// 限流规则助手
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitingAssistant;

impl RuleAssistant for RateLimitingAssistant {
    fn kind(&self) -> RuleKind {
        RuleKind::RateLimiting
    }

    fn extract_payload(&self, raw: &RawRuleDocument) -> RuleResult<(Option<RulePayload>, String)> {
        let Some(value) = raw.rate_limit.as_ref() else {
            return Ok((None, String::new()));
        };
        let rate_limit = RateLimit::deserialize(value)?;
        let revision = rate_limit.revision.clone().unwrap_or_default();
        Ok((Some(RulePayload::RateLimiting(rate_limit)), revision))
    }

    fn set_defaults(&self, payload: &mut RulePayload) {
        let RulePayload::RateLimiting(rate_limit) = payload else {
            return;
        };
        for rule in &mut rate_limit.rules {
            rule.priority.get_or_insert(0);
            rule.resource.get_or_insert(LimitResource::Qps);
            rule.limit_type.get_or_insert(LimitType::Global);
            rule.action.get_or_insert_with(|| DEFAULT_RATE_LIMIT_ACTION.to_string());
            rule.disable.get_or_insert(false);
        }
        // 稳定排序，优先级数值越小越先匹配
        rate_limit
            .rules
            .sort_by(|a, b| (a.priority, &a.id).cmp(&(b.priority, &b.id)));
    }

    fn validate(&self, payload: &RulePayload, cache: &MatcherCache) -> RuleResult<()> {
        let RulePayload::RateLimiting(rate_limit) = payload else {
            return Err(RuleError::MalformedDocument(format!(
                "rate limiting assistant received {} payload",
                payload.kind()
            )));
        };
        for rule in &rate_limit.rules {
            build_from_metadata(&rule.labels, cache).inspect_err(|e| {
                warn!("Rate limit rule {} labels invalid: {}", rule.id, e);
            })?;
        }
        Ok(())
    }
}
