//! 正则编译器
//! 只允许 regex crate 的有限自动机方言：线性时间匹配，不支持回溯/环视/反向引用

use regex::{Error as RegexError, Regex, RegexBuilder};
use std::fmt::Debug;

use crate::config::RuleConfig;

/// 可插拔的模式编译器
/// 产物固定为 regex::Regex，保证调用方拿到的匹配器都是线性时间的
pub trait PatternCompiler: Debug + Send + Sync {
    fn compile(&self, pattern: &str) -> Result<Regex, RegexError>;
}

/// 默认编译器，按配置限制编译产物大小与嵌套深度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexCompiler {
    size_limit: usize,
    dfa_size_limit: usize,
    nest_limit: u32,
}

impl RegexCompiler {
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            size_limit: config.regex_size_limit,
            dfa_size_limit: config.dfa_size_limit,
            nest_limit: config.nest_limit,
        }
    }
}

impl Default for RegexCompiler {
    fn default() -> Self {
        Self::new(&RuleConfig::default())
    }
}

impl PatternCompiler for RegexCompiler {
    #[inline]
    fn compile(&self, pattern: &str) -> Result<Regex, RegexError> {
        RegexBuilder::new(pattern)
            .size_limit(self.size_limit)
            .dfa_size_limit(self.dfa_size_limit)
            .nest_limit(self.nest_limit)
            .build()
    }
}
