//! 全局错误类型定义
//! 规则抽取/校验/快照引导过程中的所有错误，基于thiserror实现

use regex::Error as RegexError;
use thiserror::Error;

/// 规则错误枚举
/// 校验结果需要同时返回给调用方并缓存在规则文档上，因此实现 Clone
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    // ===================== 规则文档错误 =====================
    /// 规则文档结构与声明的规则类型不兼容（抽取失败）
    #[error("规则文档格式错误：{0}")]
    MalformedDocument(String),

    /// 变量类型的匹配项没有可解析的变量名
    #[error("变量引用无效：变量类型的匹配值不能为空（字段：{field}）")]
    MalformedReference { field: String },

    // ===================== 编译相关错误 =====================
    /// 正则表达式在线性时间方言下编译失败
    #[error("正则表达式无效：{pattern}，错误：{source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: RegexError,
    },

    // ===================== 分发错误 =====================
    /// 分发表中找不到对应的规则助手（编程错误，不可恢复）
    #[error("未知规则类型：{0}")]
    UnknownRuleKind(String),

    // ===================== 快照引导错误 =====================
    /// 快照编码/解码/读取失败
    #[error("快照操作失败：{0}")]
    SnapshotError(String),
}

impl RuleError {
    /// 出错的正则文本（仅 InvalidPattern 有值）
    pub fn pattern(&self) -> Option<&str> {
        match self {
            RuleError::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(e: serde_json::Error) -> Self {
        RuleError::MalformedDocument(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for RuleError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        RuleError::SnapshotError(format!("编码失败：{}", e))
    }
}

impl From<rmp_serde::decode::Error> for RuleError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        RuleError::SnapshotError(format!("解码失败：{}", e))
    }
}

// 全局Result类型
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message_names_pattern() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = RuleError::InvalidPattern {
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(err.to_string().contains("(unclosed"));
        assert_eq!(err.pattern(), Some("(unclosed"));
    }

    #[test]
    fn test_json_error_maps_to_malformed_document() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err: RuleError = json_err.into();
        assert!(matches!(err, RuleError::MalformedDocument(_)));
        assert_eq!(err.pattern(), None);
    }

    #[test]
    fn test_messages_localized() {
        let err = RuleError::MalformedReference {
            field: "host".to_string(),
        };
        assert_eq!(err.to_string(), "变量引用无效：变量类型的匹配值不能为空（字段：host）");
        assert_eq!(
            RuleError::UnknownRuleKind("SERVICES".to_string()).to_string(),
            "未知规则类型：SERVICES"
        );
    }
}
