use reqwest::header::{CONTENT_TYPE, HeaderMap as Headers};
use std::time::Duration;

/// 单次请求的执行结果，渲染后即丢弃
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub duration: Duration,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: Vec<u8>, duration: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// 状态码 >= 400 视为失败
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }

    /// Content-Type 的媒体类型部分（去掉参数，小写）
    pub fn media_type(&self) -> Option<String> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
    }
}
