use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::enums::DocumentType;

/// 服务标识（命名空间 + 服务名），构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ServiceKey {
    pub namespace: String,
    pub service: String,
}

impl ServiceKey {
    pub fn new(namespace: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            service: service.into(),
        }
    }
}

impl Display for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.service)
    }
}

/// 下发文档中的服务信息，字段缺失按空串处理
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireService {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// 传输层下发的原始规则文档
/// routing / rateLimit 保持为不透明的 JSON 值，由对应的规则助手负责解码
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRuleDocument {
    #[serde(rename = "type", default)]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub service: Option<WireService>,
    #[serde(default)]
    pub routing: Option<serde_json::Value>,
    #[serde(default)]
    pub rate_limit: Option<serde_json::Value>,
}

impl RawRuleDocument {
    /// 文档所属服务标识
    pub fn service_key(&self) -> ServiceKey {
        match &self.service {
            Some(svc) => ServiceKey {
                namespace: svc.namespace.clone().unwrap_or_default(),
                service: svc.name.clone().unwrap_or_default(),
            },
            None => ServiceKey::default(),
        }
    }

    /// 构造路由规则文档
    pub fn routing(key: &ServiceKey, routing: serde_json::Value) -> Self {
        Self {
            doc_type: DocumentType::Routing,
            service: Some(WireService::from(key)),
            routing: Some(routing),
            rate_limit: None,
        }
    }

    /// 构造限流规则文档
    pub fn rate_limit(key: &ServiceKey, rate_limit: serde_json::Value) -> Self {
        Self {
            doc_type: DocumentType::RateLimit,
            service: Some(WireService::from(key)),
            routing: None,
            rate_limit: Some(rate_limit),
        }
    }
}

impl From<&ServiceKey> for WireService {
    fn from(key: &ServiceKey) -> Self {
        Self {
            namespace: Some(key.namespace.clone()),
            name: Some(key.service.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_wire_document() {
        let raw: RawRuleDocument = serde_json::from_value(json!({
            "type": "ROUTING",
            "service": { "namespace": "Production", "name": "order" },
            "routing": { "revision": "r1" }
        }))
        .unwrap();
        assert_eq!(raw.doc_type, DocumentType::Routing);
        assert_eq!(raw.service_key(), ServiceKey::new("Production", "order"));
        assert!(raw.rate_limit.is_none());
    }

    #[test]
    fn test_missing_service_parts_read_as_empty() {
        let raw: RawRuleDocument = serde_json::from_value(json!({
            "type": "RATE_LIMIT",
            "service": { "name": "order" }
        }))
        .unwrap();
        assert_eq!(raw.service_key(), ServiceKey::new("", "order"));

        let raw = RawRuleDocument::default();
        assert_eq!(raw.service_key(), ServiceKey::default());
        assert_eq!(raw.doc_type, DocumentType::Unknown);
    }

    #[test]
    fn test_service_key_display() {
        assert_eq!(ServiceKey::new("ns", "svc").to_string(), "ns/svc");
    }
}
