//! 全局配置管理,存储所有可配置项

/// 默认正则编译产物大小上限（字节）
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;
/// 默认惰性DFA缓存上限（字节）
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 << 20;
/// 默认正则嵌套深度上限
pub const DEFAULT_NEST_LIMIT: u32 = 64;
/// 日志中正则预览的默认最大长度
pub const DEFAULT_LOG_PREVIEW_LEN: usize = 120;

/// 规则校验配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    // 单条正则编译后的大小上限
    pub regex_size_limit: usize,
    // 单条正则惰性DFA的缓存上限
    pub dfa_size_limit: usize,
    // 正则语法嵌套深度上限
    pub nest_limit: u32,
    // 日志输出正则时的最大预览长度
    pub log_preview_len: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
            nest_limit: DEFAULT_NEST_LIMIT,
            log_preview_len: DEFAULT_LOG_PREVIEW_LEN,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> RuleConfig {
        RuleConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: RuleConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regex_size_limit(mut self, limit: usize) -> Self {
        self.config.regex_size_limit = limit;
        self
    }

    pub fn dfa_size_limit(mut self, limit: usize) -> Self {
        self.config.dfa_size_limit = limit;
        self
    }

    pub fn nest_limit(mut self, limit: u32) -> Self {
        self.config.nest_limit = limit;
        self
    }

    pub fn log_preview_len(mut self, len: usize) -> Self {
        self.config.log_preview_len = len;
        self
    }

    pub fn build(self) -> RuleConfig {
        self.config
    }
}
