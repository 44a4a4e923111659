use crate::config::LikConfig;
use crate::http::{ClientSettings, HttpClient, TransportBuilder};
use crate::parser::{RequestDefinition, ResolvedRequest};
use crate::utils::ResponseRenderer;
use crate::{LikError, Result};
use std::io::Write;
use tracing::{debug, error};

/// 单个请求的执行器
pub struct RequestExecutor {
    settings: ClientSettings,
    renderer: ResponseRenderer,
}

impl RequestExecutor {
    pub fn new() -> Self {
        Self::with_settings(ClientSettings::default())
    }

    pub fn with_settings(settings: ClientSettings) -> Self {
        Self {
            settings,
            renderer: ResponseRenderer::new(),
        }
    }

    /// 执行一个请求定义，共 `max(repeat, 1)` 次
    ///
    /// 不修改传入的定义。任意一次失败（包括状态码 >= 400）立即返回该错误。
    pub async fn execute<W: Write + ?Sized>(
        &self,
        definition: &RequestDefinition,
        config: &LikConfig,
        out: &mut W,
    ) -> Result<()> {
        let request = ResolvedRequest::resolve(definition, config);

        let result = self.execute_resolved(&request, out).await;
        if let Err(e) = &result {
            error!("request {} {} failed, {}", request.namespace, request.name, e);
        }
        result
    }

    async fn execute_resolved<W: Write + ?Sized>(
        &self,
        request: &ResolvedRequest,
        out: &mut W,
    ) -> Result<()> {
        let client = HttpClient::for_request(request, &self.settings)?;
        for attempt in 1..=request.attempts {
            debug!(
                namespace = %request.namespace,
                name = %request.name,
                attempt,
                attempts = request.attempts,
                "sending request"
            );
            self.attempt(request, &client, out).await?;
        }
        Ok(())
    }

    async fn attempt<W: Write + ?Sized>(
        &self,
        request: &ResolvedRequest,
        client: &HttpClient,
        out: &mut W,
    ) -> Result<()> {
        let transport = TransportBuilder::build(request, client)?;
        let response = client.execute(transport).await?;

        out.write_all(self.renderer.render(request, &response).as_bytes())?;

        if response.is_failure() {
            return Err(LikError::RequestFailed {
                namespace: request.namespace.clone(),
                name: request.name.clone(),
                status: response.status,
            });
        }
        Ok(())
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}
