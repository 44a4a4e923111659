use std::time::Duration;

use crate::http::body::{BodyEncoder, EncodedBody};
use crate::http::client::HttpClient;
use crate::parser::{MultiMap, ResolvedRequest};
use crate::{LikError, Result};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap as Headers, HeaderName, HeaderValue};

/// 把 [`ResolvedRequest`] 组装成可发送的 reqwest 请求
pub struct TransportBuilder;

impl TransportBuilder {
    pub fn build(request: &ResolvedRequest, client: &HttpClient) -> Result<reqwest::Request> {
        let body = request.body.as_ref().map(BodyEncoder::encode).transpose()?;

        let method = parse_method(&request.method)?;
        let mut url = reqwest::Url::parse(&request.url)
            .map_err(|e| LikError::InvalidUrl(format!("{}: {}", request.url, e)))?;
        if !request.queries.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in &request.queries {
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }

        let mut headers = build_headers(&request.headers)?;
        let mut builder = client.inner().request(method, url);
        builder = match body {
            Some(EncodedBody::Bytes {
                bytes,
                content_type,
            }) => {
                if let Some(content_type) = content_type
                    && !headers.contains_key(CONTENT_TYPE)
                {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
                }
                builder.headers(headers).body(bytes)
            }
            Some(EncodedBody::Multipart(form)) => {
                // boundary 必须与 reqwest 生成的一致
                headers.remove(CONTENT_TYPE);
                builder.headers(headers).multipart(form)
            }
            None => builder.headers(headers),
        };

        if let Some((username, password)) = request.basic_auth() {
            builder = builder.basic_auth(username, Some(password));
        }

        if let Some(timeout) = parse_timeout(&request.timeout)? {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

/// 空方法按 GET 处理
pub fn parse_method(method: &str) -> Result<Method> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| LikError::InvalidMethod(method.to_string()))
}

/// 解析超时时间，如 "3s"、"1m30s"、"500ms"
///
/// 空字符串、0 或负数（如 "-1s"）表示不超时。
pub fn parse_timeout(value: &str) -> Result<Option<Duration>> {
    let value = value.trim();
    if value.is_empty() || value == "0" {
        return Ok(None);
    }
    let (negative, magnitude) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let duration = humantime::parse_duration(magnitude).map_err(|e| LikError::InvalidDuration {
        value: value.to_string(),
        message: e.to_string(),
    })?;
    if negative {
        return Ok(None);
    }
    Ok(Some(duration).filter(|d| !d.is_zero()))
}

fn build_headers(headers: &MultiMap) -> Result<Headers> {
    let mut map = Headers::new();
    for (key, values) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| LikError::InvalidHeader {
            name: key.clone(),
            message: e.to_string(),
        })?;
        for value in values {
            let value = HeaderValue::from_str(value).map_err(|e| LikError::InvalidHeader {
                name: key.clone(),
                message: e.to_string(),
            })?;
            map.append(name.clone(), value);
        }
    }
    Ok(map)
}
