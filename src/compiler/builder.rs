use tracing::debug;

use super::cache::MatcherCache;
use crate::core::{MatchMetadata, ValueKind};
use crate::error::{RuleError, RuleResult};

/// 通过 metadata 构建正则缓存
/// 1. 通配符跳过
/// 2. 变量类型但变量名为空，直接报错
/// 3. 只有 正则 + 文本 需要预编译，其余组合由规则消费方直接匹配
/// 4. 缓存已存在则直接复用，编译失败整体失败且不写入缓存
pub fn build_from_metadata(metadata: &MatchMetadata, cache: &MatcherCache) -> RuleResult<()> {
    for (field, match_value) in metadata {
        if match_value.is_match_all() {
            continue;
        }
        if match_value.value_type == ValueKind::Variable && match_value.value.is_empty() {
            return Err(RuleError::MalformedReference {
                field: field.clone(),
            });
        }
        if !match_value.needs_compile() {
            continue;
        }
        let pattern = match_value.value.as_str();
        cache
            .get_or_compile(pattern)
            .map_err(|source| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        // 日志中的正则按字符数截断
        debug!(
            "Regex matcher ready | Field: {} | Pattern: {:.*}",
            field,
            cache.log_preview_len(),
            pattern
        );
    }
    Ok(())
}
