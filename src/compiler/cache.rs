//! 规则级正则缓存
//! 每个规则文档独占一个实例，Key 为正则原文，同一原文最多编译一次

use regex::{Error as RegexError, Regex};
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::compiler::{PatternCompiler, RegexCompiler};
use crate::config::{DEFAULT_LOG_PREVIEW_LEN, RuleConfig};

/// 编译后的匹配器，Arc 共享给规则消费方
pub type CompiledMatcher = Arc<Regex>;

#[derive(Debug)]
pub struct MatcherCache {
    matchers: RwLock<FxHashMap<String, CompiledMatcher>>,
    compiler: Arc<dyn PatternCompiler>,
    log_preview_len: usize,
}

impl Default for MatcherCache {
    fn default() -> Self {
        Self::with_compiler(Arc::new(RegexCompiler::default()))
    }
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置创建，编译限制与日志预览长度都取自配置
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut cache = Self::with_compiler(Arc::new(RegexCompiler::new(config)));
        cache.log_preview_len = config.log_preview_len;
        cache
    }

    pub fn with_compiler(compiler: Arc<dyn PatternCompiler>) -> Self {
        Self {
            matchers: RwLock::new(FxHashMap::default()),
            compiler,
            log_preview_len: DEFAULT_LOG_PREVIEW_LEN,
        }
    }

    #[inline]
    pub(crate) fn log_preview_len(&self) -> usize {
        self.log_preview_len
    }

    /// 只读查询
    pub fn get_matcher(&self, pattern: &str) -> Option<CompiledMatcher> {
        self.matchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pattern)
            .cloned()
    }

    /// 不存在时插入；已存在则保留原对象，返回缓存中的实例
    pub fn put_matcher(&self, pattern: &str, matcher: CompiledMatcher) -> CompiledMatcher {
        let mut cache_write = self.matchers.write().unwrap_or_else(PoisonError::into_inner);
        cache_write
            .entry(pattern.to_string())
            .or_insert(matcher)
            .clone()
    }

    /// 读锁查缓存 → 未命中则在锁外编译，再写锁插入
    /// 编译失败不写入缓存
    pub fn get_or_compile(&self, pattern: &str) -> Result<CompiledMatcher, RegexError> {
        if let Some(matcher) = self.get_matcher(pattern) {
            return Ok(matcher);
        }
        let compiled = Arc::new(self.compiler.compile(pattern)?);
        Ok(self.put_matcher(pattern, compiled))
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.matchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.matchers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 已缓存的正则原文（无序）
    pub fn patterns(&self) -> Vec<String> {
        self.matchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
