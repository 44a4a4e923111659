use crate::config::LikConfig;
use crate::parser::RequestDefinition;
use crate::runner::executor::RequestExecutor;
use crate::runner::types::{RunOptions, RunSummary};
use crate::{LikError, Result};
use std::collections::HashSet;
use std::io::Write;
use tracing::{debug, info};

/// 请求管理器
///
/// 按 namespace 分组、去重、过滤，然后逐个顺序执行。
pub struct RequestManager {
    options: RunOptions,
    config: LikConfig,
    requests: Vec<RequestDefinition>,
    executor: RequestExecutor,
}

impl RequestManager {
    pub fn new(options: RunOptions, config: LikConfig, requests: Vec<RequestDefinition>) -> Self {
        let executor = RequestExecutor::with_settings(options.client.clone());
        Self {
            options,
            config,
            requests,
            executor,
        }
    }

    /// 执行所有被选中的请求
    ///
    /// 重复的 namespace+name 会在执行任何请求之前报错。
    /// 单个请求失败时，只有设置了 `exitOnFailure`（或错误本身是致命的）才会中止。
    pub async fn run<W: Write + ?Sized>(&self, out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        if self.requests.is_empty() {
            info!("don't have any request");
            return Ok(summary);
        }

        let groups = group_requests(&self.requests)?;
        let selector = &self.options.selector;

        for (namespace, requests) in groups {
            if !selector.accepts_namespace(namespace) {
                debug!("skip namespace '{}'", namespace);
                continue;
            }
            for request in requests {
                if !selector.matches(request) {
                    continue;
                }
                summary.total += 1;
                match self.executor.execute(request, &self.config, out).await {
                    Ok(()) => summary.succeed += 1,
                    Err(e) => {
                        summary.failed += 1;
                        if e.is_fatal() || request.exit_on_failure {
                            return Err(e);
                        }
                    }
                }
            }
        }

        info!("{}", summary);
        Ok(summary)
    }
}

/// 按 namespace 分组
///
/// namespace 按首次出现的顺序排列，组内保持发现顺序。
pub fn group_requests(
    requests: &[RequestDefinition],
) -> Result<Vec<(&str, Vec<&RequestDefinition>)>> {
    let mut groups: Vec<(&str, Vec<&RequestDefinition>)> = Vec::new();
    let mut seen = HashSet::new();

    for request in requests {
        if !seen.insert((request.namespace.as_str(), request.name.as_str())) {
            return Err(LikError::DuplicateRequest {
                namespace: request.namespace.clone(),
                name: request.name.clone(),
            });
        }
        match groups
            .iter_mut()
            .find(|(namespace, _)| *namespace == request.namespace)
        {
            Some((_, group)) => group.push(request),
            None => groups.push((request.namespace.as_str(), vec![request])),
        }
    }
    Ok(groups)
}
