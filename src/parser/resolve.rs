use crate::config::{LikConfig, ResponseOptions};
use crate::parser::types::{Body, CertConfig, MultiMap, RequestDefinition};
use tracing::debug;

/// 合并后的响应展示选项，所有字段都已确定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_url: bool,
    pub show_header: bool,
    pub show_code: bool,
    pub show_body: bool,
    pub show_time_consumption: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_url: false,
            show_header: false,
            show_code: true,
            show_body: false,
            show_time_consumption: false,
        }
    }
}

impl From<ResponseOptions> for DisplayOptions {
    fn from(options: ResponseOptions) -> Self {
        let defaults = DisplayOptions::default();
        Self {
            show_url: options.show_url.unwrap_or(defaults.show_url),
            show_header: options.show_header.unwrap_or(defaults.show_header),
            show_code: options.show_code.unwrap_or(defaults.show_code),
            show_body: options.show_body.unwrap_or(defaults.show_body),
            show_time_consumption: options
                .show_time_consumption
                .unwrap_or(defaults.show_time_consumption),
        }
    }
}

/// 可直接执行的请求
///
/// 从 [`RequestDefinition`] 复制而来，所有可选字段按
/// 请求 → namespace → 全局 → 默认值 的顺序填充，
/// 并展开了 `url` 与 `timeout` 中的宏。
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub namespace: String,
    pub name: String,
    pub method: String,
    pub url: String,
    pub headers: MultiMap,
    pub queries: MultiMap,
    pub body: Option<Body>,
    pub timeout: String,
    pub exit_on_failure: bool,
    pub attempts: u32,
    pub display: DisplayOptions,
    pub cert_config: CertConfig,
    pub username: String,
    pub password: String,
}

impl ResolvedRequest {
    pub fn resolve(definition: &RequestDefinition, config: &LikConfig) -> Self {
        let namespace_config = config.namespace_config(&definition.namespace);

        let mut timeout = definition.timeout.as_str();
        let mut response = definition.response;
        if let Some(ns) = namespace_config {
            if timeout.is_empty() {
                timeout = ns.request.timeout.as_str();
            }
            response = response.or(ns.response);
        }
        if timeout.is_empty() {
            timeout = config.request.timeout.as_str();
        }
        let response = response.or(config.response);

        let url = config
            .replace_macro(&definition.namespace, &definition.url)
            .into_owned();
        let timeout = config
            .replace_macro(&definition.namespace, timeout)
            .into_owned();

        debug!(
            namespace = %definition.namespace,
            name = %definition.name,
            url = %url,
            timeout = %timeout,
            "resolved request"
        );

        Self {
            namespace: definition.namespace.clone(),
            name: definition.name.clone(),
            method: definition.method.clone(),
            url,
            headers: definition.headers.clone(),
            queries: definition.queries.clone(),
            body: definition.body.clone(),
            timeout,
            exit_on_failure: definition.exit_on_failure,
            attempts: definition.attempts(),
            display: response.into(),
            cert_config: definition.cert_config.clone(),
            username: definition.username.clone(),
            password: definition.password.clone(),
        }
    }

    /// 是否需要设置 basic auth
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() || self.password.is_empty() {
            None
        } else {
            Some((&self.username, &self.password))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvConfig, NamespaceConfig, RequestConfig};

    fn config_with(
        global: ResponseOptions,
        namespace: Option<ResponseOptions>,
        global_timeout: &str,
        namespace_timeout: &str,
    ) -> LikConfig {
        LikConfig {
            config: namespace
                .map(|response| {
                    vec![NamespaceConfig {
                        namespace: "api".to_string(),
                        request: RequestConfig {
                            timeout: namespace_timeout.to_string(),
                        },
                        response,
                    }]
                })
                .unwrap_or_default(),
            request: RequestConfig {
                timeout: global_timeout.to_string(),
            },
            response: global,
            ..Default::default()
        }
    }

    #[test]
    fn test_hardcoded_defaults() {
        let def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping");
        let resolved = ResolvedRequest::resolve(&def, &LikConfig::default());
        assert_eq!(resolved.display, DisplayOptions::default());
        assert!(resolved.display.show_code);
        assert!(!resolved.display.show_body);
        assert_eq!(resolved.timeout, "");
        assert_eq!(resolved.attempts, 1);
    }

    #[test]
    fn test_namespace_false_beats_global_true() {
        let config = config_with(
            ResponseOptions {
                show_code: Some(true),
                ..Default::default()
            },
            Some(ResponseOptions {
                show_code: Some(false),
                ..Default::default()
            }),
            "",
            "",
        );
        let def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping");
        let resolved = ResolvedRequest::resolve(&def, &config);
        assert!(!resolved.display.show_code);
    }

    #[test]
    fn test_request_level_wins() {
        let config = config_with(
            ResponseOptions {
                show_body: Some(false),
                ..Default::default()
            },
            Some(ResponseOptions {
                show_body: Some(false),
                show_header: Some(true),
                ..Default::default()
            }),
            "10s",
            "5s",
        );
        let mut def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping");
        def.response.show_body = Some(true);
        def.timeout = "1s".to_string();

        let resolved = ResolvedRequest::resolve(&def, &config);
        assert!(resolved.display.show_body);
        assert!(resolved.display.show_header);
        assert_eq!(resolved.timeout, "1s");
    }

    #[test]
    fn test_timeout_precedence() {
        let config = config_with(ResponseOptions::default(), Some(ResponseOptions::default()), "10s", "5s");

        let def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping");
        assert_eq!(ResolvedRequest::resolve(&def, &config).timeout, "5s");

        let def = RequestDefinition::new("billing", "ping", "GET", "http://localhost/ping");
        assert_eq!(ResolvedRequest::resolve(&def, &config).timeout, "10s");

        let config = config_with(ResponseOptions::default(), Some(ResponseOptions::default()), "10s", "");
        let def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping");
        assert_eq!(ResolvedRequest::resolve(&def, &config).timeout, "10s");
    }

    #[test]
    fn test_macros_in_url_and_timeout() {
        let config = LikConfig {
            env: vec![
                EnvConfig {
                    namespace: String::new(),
                    env: [("HOST", "example.com"), ("TIMEOUT", "2s")]
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
            ],
            request: RequestConfig {
                timeout: "${TIMEOUT}".to_string(),
            },
            ..Default::default()
        };
        let def = RequestDefinition::new("api", "ping", "GET", "https://${HOST}/ping");
        let resolved = ResolvedRequest::resolve(&def, &config);
        assert_eq!(resolved.url, "https://example.com/ping");
        assert_eq!(resolved.timeout, "2s");
    }

    #[test]
    fn test_resolve_does_not_share_containers() {
        let def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping")
            .with_header("X-Id", "1")
            .with_query("q", "a");
        let mut resolved = ResolvedRequest::resolve(&def, &LikConfig::default());
        resolved
            .headers
            .insert("Content-Type".to_string(), vec!["application/json".to_string()]);
        resolved.queries.clear();

        assert_eq!(def.headers.len(), 1);
        assert_eq!(def.queries.len(), 1);
    }

    #[test]
    fn test_basic_auth_requires_both() {
        let mut def = RequestDefinition::new("api", "ping", "GET", "http://localhost/ping");
        def.username = "user".to_string();
        let resolved = ResolvedRequest::resolve(&def, &LikConfig::default());
        assert!(resolved.basic_auth().is_none());

        def.password = "secret".to_string();
        let resolved = ResolvedRequest::resolve(&def, &LikConfig::default());
        assert_eq!(resolved.basic_auth(), Some(("user", "secret")));
    }
}
