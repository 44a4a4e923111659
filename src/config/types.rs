use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::macros::MacroResolver;

/// 进程级默认配置
///
/// 启动时加载一次，之后只读。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LikConfig {
    /// 宏环境，namespace 为空表示全局
    pub env: Vec<EnvConfig>,

    /// namespace 级别的覆盖配置
    pub config: Vec<NamespaceConfig>,

    /// 全局请求默认值
    pub request: RequestConfig,

    /// 全局响应展示默认值
    pub response: ResponseOptions,
}

/// 一组 `${NAME}` 宏的取值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub namespace: String,
    pub env: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub namespace: String,
    pub request: RequestConfig,
    pub response: ResponseOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// 超时时间，如 "3s"、"500ms"；空字符串表示不超时
    pub timeout: String,
}

/// 响应展示选项
///
/// 每个字段都是三态：`None` 表示未设置，由下一级配置决定。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseOptions {
    pub show_url: Option<bool>,
    pub show_header: Option<bool>,
    pub show_code: Option<bool>,
    pub show_body: Option<bool>,
    pub show_time_consumption: Option<bool>,
}

impl ResponseOptions {
    /// 用 `fallback` 填充本级未设置的字段
    pub fn or(self, fallback: ResponseOptions) -> ResponseOptions {
        ResponseOptions {
            show_url: self.show_url.or(fallback.show_url),
            show_header: self.show_header.or(fallback.show_header),
            show_code: self.show_code.or(fallback.show_code),
            show_body: self.show_body.or(fallback.show_body),
            show_time_consumption: self.show_time_consumption.or(fallback.show_time_consumption),
        }
    }
}

impl LikConfig {
    /// 查找 namespace 对应的覆盖配置，第一个匹配项生效
    pub fn namespace_config(&self, namespace: &str) -> Option<&NamespaceConfig> {
        self.config.iter().find(|c| c.namespace == namespace)
    }

    /// 替换文本中的 `${NAME}` 宏
    pub fn replace_macro<'a>(&self, namespace: &str, text: &'a str) -> Cow<'a, str> {
        MacroResolver::resolve(namespace, text, &self.env)
    }
}
