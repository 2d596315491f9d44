//! 编译模块：正则编译器 + 规则级匹配器缓存
pub mod builder;
pub mod cache;
pub mod compiler;

pub use self::builder::build_from_metadata;
pub use self::cache::{CompiledMatcher, MatcherCache};
pub use self::compiler::{PatternCompiler, RegexCompiler};
