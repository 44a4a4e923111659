use crate::parser::{Body, FilePart, FormDataField};
use crate::{LikError, Result};
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use std::fs;
use tracing::{debug, warn};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// 编码后的请求体
pub enum EncodedBody {
    /// 普通字节流，`content_type` 为需要补充的 Content-Type
    Bytes {
        bytes: Vec<u8>,
        content_type: Option<&'static str>,
    },
    /// multipart/form-data，Content-Type（含 boundary）由 reqwest 生成
    Multipart(Form),
}

/// 请求体编码器
pub struct BodyEncoder;

impl BodyEncoder {
    pub fn encode(body: &Body) -> Result<EncodedBody> {
        debug!("Encoding {} body", body.kind());
        match body {
            Body::Json(value) => Ok(EncodedBody::Bytes {
                bytes: serde_json::to_vec(value)?,
                content_type: Some(JSON_CONTENT_TYPE),
            }),
            Body::Form(map) => Ok(EncodedBody::Bytes {
                bytes: Self::encode_form(map).into_bytes(),
                content_type: Some(FORM_CONTENT_TYPE),
            }),
            Body::FormData(fields) => Self::encode_form_data(fields).map(EncodedBody::Multipart),
            Body::Raw(value) => Ok(EncodedBody::Bytes {
                bytes: serde_json::to_vec(value)?,
                content_type: None,
            }),
        }
    }

    /// URL 编码 key/value，数组展开为重复的 key
    pub fn encode_form(map: &Map<String, Value>) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in map {
            match value {
                Value::Array(values) => {
                    for value in values {
                        serializer.append_pair(key, &form_value(value));
                    }
                }
                value => {
                    serializer.append_pair(key, &form_value(value));
                }
            }
        }
        serializer.finish()
    }

    fn encode_form_data(fields: &[FormDataField]) -> Result<Form> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormDataField::Kv { name, value } => form.text(name.clone(), value.clone()),
                FormDataField::File(file) => {
                    let part = Part::bytes(file_content(file)?)
                        .file_name(file.filename.clone())
                        .mime_str("application/octet-stream")?;
                    form.part(file.name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 读取文件字段内容
///
/// 设置了 `file_path` 时读取文件，读取失败则使用 `content`。
pub fn file_content(file: &FilePart) -> Result<Vec<u8>> {
    if file.file_path.is_empty() && file.content.is_empty() {
        return Err(LikError::InvalidFileField {
            name: file.name.clone(),
        });
    }
    if file.file_path.is_empty() {
        return Ok(file.content.clone().into_bytes());
    }
    match fs::read(&file.file_path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            warn!(
                "Failed to read form file {}, fall back to content: {}",
                file.file_path, e
            );
            Ok(file.content.clone().into_bytes())
        }
    }
}
