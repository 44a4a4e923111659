use thiserror::Error;

#[derive(Error, Debug)]
pub enum LikError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("request namespace '{namespace}' name '{name}' already exist")]
    DuplicateRequest { namespace: String, name: String },

    #[error("unsupported body type {0}")]
    UnsupportedEncoding(String),

    #[error("无效的请求体: {0}")]
    InvalidBody(String),

    #[error("invalid form data file '{name}', file path or file content required")]
    InvalidFileField { name: String },

    #[error("无效的超时时间 '{value}': {message}")]
    InvalidDuration { value: String, message: String },

    #[error("无效的 HTTP 方法: {0}")]
    InvalidMethod(String),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("无效的 Header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("unable to load client cert '{path}': {message}")]
    ClientCert { path: String, message: String },

    #[error("request {namespace} {name} failed, code {status}")]
    RequestFailed {
        namespace: String,
        name: String,
        status: u16,
    },

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML 解析错误: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LikError {
    /// 是否应终止整个运行（不受 exitOnFailure 影响）
    ///
    /// 重复的 namespace+name 与损坏的客户端证书文件都属于此类。
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LikError::DuplicateRequest { .. } | LikError::ClientCert { .. }
        )
    }
}

/// Result type for lik crate
pub type Result<T> = std::result::Result<T, LikError>;
