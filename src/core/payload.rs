use super::enums::RuleKind;
use super::rate_limit::RateLimit;
use super::routing::Routing;

/// 规则值，具体形态由规则类型决定
#[derive(Debug, Clone, PartialEq)]
pub enum RulePayload {
    Routing(Routing),
    RateLimiting(RateLimit),
}

impl RulePayload {
    /// 规则值对应的规则类型
    pub fn kind(&self) -> RuleKind {
        match self {
            RulePayload::Routing(_) => RuleKind::Routing,
            RulePayload::RateLimiting(_) => RuleKind::RateLimiting,
        }
    }

    pub fn as_routing(&self) -> Option<&Routing> {
        match self {
            RulePayload::Routing(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rate_limit(&self) -> Option<&RateLimit> {
        match self {
            RulePayload::RateLimiting(r) => Some(r),
            _ => None,
        }
    }
}
