mod enums;
mod match_string;
mod payload;
mod rate_limit;
mod routing;
mod wire;

// 导出常用项
pub use enums::{DocumentType, MatchKind, RuleKind, ValueKind};
pub use match_string::{MATCH_ALL, MatchMetadata, MatchString};
pub use payload::RulePayload;
pub use rate_limit::{Amount, LimitResource, LimitType, RateLimit, RateLimitRule};
pub use routing::{Destination, Route, Routing, Source};
pub use wire::{RawRuleDocument, ServiceKey, WireService};
