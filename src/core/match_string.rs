use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::enums::{MatchKind, ValueKind};

/// 通配符，匹配任意值，不需要编译
pub const MATCH_ALL: &str = "*";

/// 单个字段的匹配描述
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchString {
    #[serde(rename = "type", default)]
    pub match_kind: MatchKind,
    #[serde(default)]
    pub value_type: ValueKind,
    #[serde(default)]
    pub value: String,
}

impl MatchString {
    pub fn new(match_kind: MatchKind, value_type: ValueKind, value: impl Into<String>) -> Self {
        Self {
            match_kind,
            value_type,
            value: value.into(),
        }
    }

    /// 文本正则
    pub fn regex(value: impl Into<String>) -> Self {
        Self::new(MatchKind::Regex, ValueKind::Text, value)
    }

    /// 文本精确匹配
    pub fn exact(value: impl Into<String>) -> Self {
        Self::new(MatchKind::Exact, ValueKind::Text, value)
    }

    #[inline]
    pub fn is_match_all(&self) -> bool {
        self.value == MATCH_ALL
    }

    /// 是否需要预编译正则：仅 正则 + 字面文本 组合
    #[inline]
    pub fn needs_compile(&self) -> bool {
        self.match_kind == MatchKind::Regex && self.value_type == ValueKind::Text
    }
}

/// 字段名 -> 匹配描述
pub type MatchMetadata = FxHashMap<String, MatchString>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_fields_missing() {
        let m: MatchString = serde_json::from_value(json!({})).unwrap();
        assert_eq!(m.match_kind, MatchKind::Exact);
        assert_eq!(m.value_type, ValueKind::Text);
        assert_eq!(m.value, "");
    }

    #[test]
    fn test_needs_compile_only_for_regex_text() {
        assert!(MatchString::regex("^a").needs_compile());
        assert!(!MatchString::exact("^a").needs_compile());
        assert!(!MatchString::new(MatchKind::Regex, ValueKind::Variable, "HOST").needs_compile());
        assert!(!MatchString::new(MatchKind::Regex, ValueKind::Parameter, "q").needs_compile());
    }

    #[test]
    fn test_wire_field_names() {
        let m: MatchString = serde_json::from_value(json!({
            "type": "REGEX",
            "valueType": "VARIABLE",
            "value": "ENV_KEY"
        }))
        .unwrap();
        assert_eq!(m, MatchString::new(MatchKind::Regex, ValueKind::Variable, "ENV_KEY"));
    }

    #[test]
    fn test_metadata_map_from_wire() {
        let meta: MatchMetadata = serde_json::from_value(json!({
            "env": { "value": "*" },
            "uri": { "type": "REGEX", "value": "^/api" }
        }))
        .unwrap();
        let fx: &FxHashMap<String, MatchString> = &meta;
        assert_eq!(fx.len(), 2);
        assert!(meta["env"].is_match_all());
        assert_eq!(meta["uri"], MatchString::regex("^/api"));
    }
}
