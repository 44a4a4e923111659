use crate::config::types::EnvConfig;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// `${NAME}` 宏替换器
///
/// 先查 namespace 对应的环境，再查全局环境（namespace 为空）。
/// 两处都找不到时保留原始的 `${NAME}` 文本。
pub struct MacroResolver;

impl MacroResolver {
    pub fn resolve<'a>(namespace: &str, text: &'a str, envs: &[EnvConfig]) -> Cow<'a, str> {
        if text.is_empty() || envs.is_empty() || !text.contains("${") || !text.contains('}') {
            return Cow::Borrowed(text);
        }

        static MACRO_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = MACRO_REGEX.get_or_init(|| Regex::new(r"\$\{([^{}]+)\}").unwrap());

        let (namespace_env, global_env) = Self::scoped_envs(namespace, envs);

        re.replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            namespace_env
                .and_then(|env| env.get(name))
                .or_else(|| global_env.and_then(|env| env.get(name)))
                .map(|value| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
    }

    /// 单次线性扫描，同一 namespace 出现多次时第一个生效
    fn scoped_envs<'e>(
        namespace: &str,
        envs: &'e [EnvConfig],
    ) -> (
        Option<&'e HashMap<String, String>>,
        Option<&'e HashMap<String, String>>,
    ) {
        let mut namespace_env = None;
        let mut global_env = None;
        for env in envs {
            if env.namespace.is_empty() {
                global_env.get_or_insert(&env.env);
            } else if env.namespace == namespace {
                namespace_env.get_or_insert(&env.env);
            }
            if namespace_env.is_some() && global_env.is_some() {
                break;
            }
        }
        (namespace_env, global_env)
    }
}
