use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::RuleError;

/// 下发协议中的文档类型标签
/// 未识别的字符串统一落到 Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Instance,
    Cluster,
    Routing,
    RateLimit,
    CircuitBreaker,
    Services,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Unknown => write!(f, "UNKNOWN"),
            DocumentType::Instance => write!(f, "INSTANCE"),
            DocumentType::Cluster => write!(f, "CLUSTER"),
            DocumentType::Routing => write!(f, "ROUTING"),
            DocumentType::RateLimit => write!(f, "RATE_LIMIT"),
            DocumentType::CircuitBreaker => write!(f, "CIRCUIT_BREAKER"),
            DocumentType::Services => write!(f, "SERVICES"),
        }
    }
}

/// 规则类型，决定由哪个规则助手负责解析与校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    Routing,
    RateLimiting,
}

impl RuleKind {
    /// 所有规则类型，分发表必须为每一项注册助手
    pub const ALL: [RuleKind; 2] = [RuleKind::Routing, RuleKind::RateLimiting];
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Routing => write!(f, "routing"),
            RuleKind::RateLimiting => write!(f, "rate_limiting"),
        }
    }
}

impl TryFrom<DocumentType> for RuleKind {
    type Error = RuleError;

    fn try_from(value: DocumentType) -> Result<Self, Self::Error> {
        match value {
            DocumentType::Routing => Ok(RuleKind::Routing),
            DocumentType::RateLimit => Ok(RuleKind::RateLimiting),
            other => Err(RuleError::UnknownRuleKind(other.to_string())),
        }
    }
}

/// 匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchKind {
    #[default]
    Exact,
    Regex,
    NotEquals,
    In,
    NotIn,
}

/// 匹配值的来源：字面文本 / 请求参数 / 环境变量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    #[default]
    Text,
    Parameter,
    Variable,
}
