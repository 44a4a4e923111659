use std::time::{Duration, Instant};

use crate::http::response::Response;
use crate::http::tls::load_client_identity;
use crate::parser::ResolvedRequest;
use crate::{LikError, Result};
use reqwest::tls::Version;
use tracing::debug;

/// 连接池与超时设置
///
/// 固定的工程默认值，不对用户开放。
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub min_tls_version: Version,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 100,
            min_tls_version: Version::TLS_1_2,
        }
    }
}

/// 单个请求专用的 HTTP 客户端
///
/// 每个 [`ResolvedRequest`] 构建一次，在 repeat 之间复用连接。
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn for_request(request: &ResolvedRequest, settings: &ClientSettings) -> Result<Self> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| LikError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .tcp_keepalive(settings.tcp_keepalive)
            .pool_idle_timeout(settings.pool_idle_timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host);

        // SNI 由 reqwest 根据 host（不含端口）设置
        if url.scheme() == "https" {
            let insecure = request.cert_config.insecure_skip_verify;
            builder = builder
                .min_tls_version(settings.min_tls_version)
                .danger_accept_invalid_certs(insecure)
                .danger_accept_invalid_hostnames(insecure);
            let cert_file = request.cert_config.client_cert_file.as_str();
            if let Some(identity) = load_client_identity(cert_file)? {
                // 私钥与证书不匹配时 rustls 在这里才报错
                let inner = builder.identity(identity).build().map_err(|e| LikError::ClientCert {
                    path: cert_file.to_string(),
                    message: format!("unable to load client cert and key pair: {}", e),
                })?;
                debug!(host = url.host_str().unwrap_or_default(), insecure, "mTLS client configured");
                return Ok(Self { inner });
            }
            debug!(
                host = url.host_str().unwrap_or_default(),
                insecure, "TLS client configured"
            );
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// 发送请求并读取完整响应，耗时只统计发送阶段
    pub async fn execute(&self, request: reqwest::Request) -> Result<Response> {
        let start = Instant::now();
        let response = self.inner.execute(request).await?;
        let duration = start.elapsed();

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body.to_vec(), duration))
    }
}
