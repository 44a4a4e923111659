use crate::config::ResponseOptions;
use crate::{LikError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 多值映射（headers / queries）
pub type MultiMap = BTreeMap<String, Vec<String>>;

/// 单个请求定义
///
/// (`namespace`, `name`) 在整个定义集合中必须唯一。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestDefinition {
    pub namespace: String,
    pub name: String,
    pub method: String,
    pub url: String,

    #[serde(deserialize_with = "multi_map::deserialize")]
    pub headers: MultiMap,

    #[serde(deserialize_with = "multi_map::deserialize")]
    pub queries: MultiMap,

    /// 请求体，`data` 缺失时为 None
    #[serde(deserialize_with = "deserialize_body")]
    pub body: Option<Body>,

    /// 超时时间，空字符串表示使用上级配置
    pub timeout: String,

    pub skip: bool,
    pub exit_on_failure: bool,

    /// 重复次数，小于 1 时按 1 处理
    pub repeat: i32,

    pub response: ResponseOptions,
    pub cert_config: CertConfig,

    /// Basic auth，两者都非空时生效
    pub username: String,
    pub password: String,
}

impl RequestDefinition {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        method: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.queries
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// 实际执行次数
    pub fn attempts(&self) -> u32 {
        self.repeat.max(1) as u32
    }
}

/// TLS 客户端配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertConfig {
    pub insecure_skip_verify: bool,

    /// 同时包含私钥与证书的 PEM 文件
    pub client_cert_file: String,
}

/// 请求体编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
    FormData,
    Raw,
}

impl FromStr for BodyKind {
    type Err = LikError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "json" => Ok(BodyKind::Json),
            "form" => Ok(BodyKind::Form),
            "form-data" => Ok(BodyKind::FormData),
            "raw" => Ok(BodyKind::Raw),
            other => Err(LikError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Json => "json",
            BodyKind::Form => "form",
            BodyKind::FormData => "form-data",
            BodyKind::Raw => "raw",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 请求体
///
/// 文档中的 `{type, data}` 在解析阶段就转换为具体的变体。
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Form(Map<String, Value>),
    FormData(Vec<FormDataField>),
    /// 按 JSON 序列化后原样发送，不设置 Content-Type
    Raw(Value),
}

impl Body {
    /// 由编码方式和任意数据构建请求体，`data` 为 null 时没有请求体
    pub fn from_parts(kind: BodyKind, data: Value) -> Result<Option<Body>> {
        if data.is_null() {
            return Ok(None);
        }
        let body = match kind {
            BodyKind::Json => Body::Json(data),
            BodyKind::Form => match data {
                Value::Object(map) => Body::Form(map),
                other => {
                    return Err(LikError::InvalidBody(format!(
                        "form body must be a key/value map, got {}",
                        other
                    )));
                }
            },
            BodyKind::FormData => Body::FormData(serde_json::from_value(data)?),
            BodyKind::Raw => Body::Raw(data),
        };
        Ok(Some(body))
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Json(_) => BodyKind::Json,
            Body::Form(_) => BodyKind::Form,
            Body::FormData(_) => BodyKind::FormData,
            Body::Raw(_) => BodyKind::Raw,
        }
    }
}

/// form-data 中的一个字段
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormDataField {
    Kv {
        #[serde(default)]
        name: String,
        #[serde(default)]
        value: String,
    },
    File(FilePart),
}

/// form-data 中的文件字段
///
/// 优先读取 `file_path`，读取失败时退回 `content`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilePart {
    pub name: String,
    pub filename: String,
    pub file_path: String,
    pub content: String,
}

#[derive(Deserialize)]
struct BodyDocument {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    data: Value,
}

fn deserialize_body<'de, D>(deserializer: D) -> std::result::Result<Option<Body>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(document) = Option::<BodyDocument>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let kind: BodyKind = document.kind.parse().map_err(D::Error::custom)?;
    Body::from_parts(kind, document.data).map_err(D::Error::custom)
}

mod multi_map {
    use super::MultiMap;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    /// 单值或多值
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Value>),
        One(Value),
    }

    fn scalar_to_string(value: Value) -> String {
        match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<MultiMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<BTreeMap<String, OneOrMany>> = Option::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(|(key, values)| {
                let values = match values {
                    OneOrMany::Many(values) => values.into_iter().map(scalar_to_string).collect(),
                    OneOrMany::One(value) => vec![scalar_to_string(value)],
                };
                (key, values)
            })
            .collect())
    }
}
