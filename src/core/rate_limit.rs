use serde::{Deserialize, Serialize};

use super::match_string::MatchMetadata;

/// 限流规则集合
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateLimit {
    #[serde(default)]
    pub rules: Vec<RateLimitRule>,
    #[serde(default)]
    pub revision: Option<String>,
}

/// 限流资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitResource {
    Qps,
    Concurrency,
}

/// 限流生效范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitType {
    Global,
    Local,
}

/// 单条限流规则
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub resource: Option<LimitResource>,
    #[serde(rename = "type", default)]
    pub limit_type: Option<LimitType>,
    #[serde(default)]
    pub labels: MatchMetadata,
    #[serde(default)]
    pub amounts: Vec<Amount>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub disable: Option<bool>,
    #[serde(default)]
    pub revision: Option<String>,
}

/// 配额：时间窗口内允许的最大请求数
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    #[serde(default)]
    pub max_amount: u32,
    /// 时间窗口，如 "1s"
    #[serde(default)]
    pub valid_duration: String,
}
