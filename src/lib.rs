//! svc-rules - 服务治理规则（路由/限流）的解析、校验与正则匹配器缓存

// 导出全局错误类型
pub use self::error::{RuleError, RuleResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, RuleConfig};

// 导出规则数据模型
pub use self::core::{
    Amount, Destination, DocumentType, LimitResource, LimitType, MATCH_ALL, MatchKind,
    MatchMetadata, MatchString, RateLimit, RateLimitRule, RawRuleDocument, Route, Routing,
    RuleKind, RulePayload, ServiceKey, Source, ValueKind, WireService,
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledMatcher, MatcherCache, PatternCompiler, RegexCompiler, build_from_metadata,
};

// 导出规则助手与分发表
pub use self::assistant::{
    RateLimitingAssistant, RoutingAssistant, RuleAssistant, assistant_for, assistant_for_document,
};

// 导出规则文档与快照引导
pub use self::rule::{
    DocumentState, MemorySnapshotStore, RuleDocument, SnapshotStore, bootstrap_from_snapshot,
    decode_snapshot, encode_snapshot,
};

// 声明所有子模块
pub mod assistant;
pub mod compiler;
pub mod config;
pub mod core;
pub mod error;
pub mod rule;
