use crate::http::ClientSettings;
use crate::parser::RequestDefinition;
use std::fmt;

/// namespace / name 过滤条件
///
/// - 都为空：执行所有未跳过的请求
/// - 只有 namespace：执行该 namespace 下的请求
/// - 只有 name：执行任意 namespace 下同名的请求
/// - 都有：精确匹配
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub namespace: Option<String>,
    pub name: Option<String>,
}

impl Selector {
    /// 空字符串视为未设置
    pub fn new(namespace: Option<String>, name: Option<String>) -> Self {
        Self {
            namespace: namespace.filter(|s| !s.is_empty()),
            name: name.filter(|s| !s.is_empty()),
        }
    }

    pub fn accepts_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref().is_none_or(|ns| ns == namespace)
    }

    /// 跳过的请求永远不执行
    pub fn matches(&self, request: &RequestDefinition) -> bool {
        if request.skip {
            return false;
        }
        self.accepts_namespace(&request.namespace)
            && self.name.as_deref().is_none_or(|name| name == request.name)
    }
}

/// 运行选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub selector: Selector,
    pub client: ClientSettings,
}

impl RunOptions {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            ..Default::default()
        }
    }
}

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeed: usize,
    pub failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {}, succeed {}, failed {}",
            self.total, self.succeed, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(namespace: &str, name: &str) -> RequestDefinition {
        RequestDefinition::new(namespace, name, "GET", "http://localhost")
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        let selector = Selector::new(Some(String::new()), None);
        assert_eq!(selector, Selector::default());
        assert!(selector.matches(&def("api", "ping")));
        assert!(selector.matches(&def("", "ping")));
    }

    #[test]
    fn test_namespace_only() {
        let selector = Selector::new(Some("api".to_string()), None);
        assert!(selector.matches(&def("api", "ping")));
        assert!(!selector.matches(&def("billing", "ping")));
    }

    #[test]
    fn test_name_only() {
        let selector = Selector::new(None, Some("ping".to_string()));
        assert!(selector.matches(&def("api", "ping")));
        assert!(selector.matches(&def("billing", "ping")));
        assert!(!selector.matches(&def("api", "pong")));
    }

    #[test]
    fn test_exact_match() {
        let selector = Selector::new(Some("api".to_string()), Some("ping".to_string()));
        assert!(selector.matches(&def("api", "ping")));
        assert!(!selector.matches(&def("billing", "ping")));
        assert!(!selector.matches(&def("api", "pong")));
    }

    #[test]
    fn test_skip_always_wins() {
        let mut request = def("api", "ping");
        request.skip = true;
        let selector = Selector::new(Some("api".to_string()), Some("ping".to_string()));
        assert!(!selector.matches(&request));
        assert!(!Selector::default().matches(&request));
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            total: 3,
            succeed: 2,
            failed: 1,
        };
        assert_eq!(summary.to_string(), "total 3, succeed 2, failed 1");
    }
}
