use serde::Deserialize;
use tracing::warn;

use super::RuleAssistant;
use crate::compiler::{MatcherCache, build_from_metadata};
use crate::core::{RawRuleDocument, Route, RuleKind, RulePayload, Routing};
use crate::error::{RuleError, RuleResult};

/// 路由目标未配置权重时的默认值
pub const DEFAULT_DESTINATION_WEIGHT: u32 = 100;

/// 路由规则助手
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingAssistant;

impl RoutingAssistant {
    fn validate_routes(direction: &str, routes: &[Route], cache: &MatcherCache) -> RuleResult<()> {
        for (idx, route) in routes.iter().enumerate() {
            for source in &route.sources {
                build_from_metadata(&source.metadata, cache).inspect_err(|e| {
                    warn!("Routing {} route #{} source invalid: {}", direction, idx, e);
                })?;
            }
            for destination in &route.destinations {
                build_from_metadata(&destination.metadata, cache).inspect_err(|e| {
                    warn!("Routing {} route #{} destination invalid: {}", direction, idx, e);
                })?;
            }
        }
        Ok(())
    }
}

impl RuleAssistant for RoutingAssistant {
    fn kind(&self) -> RuleKind {
        RuleKind::Routing
    }

    fn extract_payload(&self, raw: &RawRuleDocument) -> RuleResult<(Option<RulePayload>, String)> {
        let Some(value) = raw.routing.as_ref() else {
            return Ok((None, String::new()));
        };
        let routing = Routing::deserialize(value)?;
        let revision = routing.revision.clone().unwrap_or_default();
        Ok((Some(RulePayload::Routing(routing)), revision))
    }

    fn set_defaults(&self, payload: &mut RulePayload) {
        let RulePayload::Routing(routing) = payload else {
            return;
        };
        for route in routing.inbounds.iter_mut().chain(routing.outbounds.iter_mut()) {
            for destination in &mut route.destinations {
                destination.weight.get_or_insert(DEFAULT_DESTINATION_WEIGHT);
                destination.priority.get_or_insert(0);
                destination.isolate.get_or_insert(false);
            }
        }
    }

    fn validate(&self, payload: &RulePayload, cache: &MatcherCache) -> RuleResult<()> {
        let RulePayload::Routing(routing) = payload else {
            return Err(RuleError::MalformedDocument(format!(
                "routing assistant received {} payload",
                payload.kind()
            )));
        };
        Self::validate_routes("inbound", &routing.inbounds, cache)?;
        Self::validate_routes("outbound", &routing.outbounds, cache)
    }
}
