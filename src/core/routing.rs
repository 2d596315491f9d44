use serde::{Deserialize, Serialize};

use super::match_string::MatchMetadata;

/// 路由规则
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routing {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub inbounds: Vec<Route>,
    #[serde(default)]
    pub outbounds: Vec<Route>,
    #[serde(default)]
    pub revision: Option<String>,
}

/// 单条路由：来源条件 -> 目标集合
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

/// 路由来源
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// 路由目标
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub metadata: MatchMetadata,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub transfer: Option<String>,
    #[serde(default)]
    pub isolate: Option<bool>,
}
