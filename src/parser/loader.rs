use crate::Result;
use crate::parser::types::RequestDefinition;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 一个文档可以包含多个请求定义，也可以只有一个
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Many(Vec<RequestDefinition>),
    One(Box<RequestDefinition>),
}

impl From<Document> for Vec<RequestDefinition> {
    fn from(document: Document) -> Self {
        match document {
            Document::Many(definitions) => definitions,
            Document::One(definition) => vec![*definition],
        }
    }
}

/// 请求文档加载器
pub struct DocumentLoader;

impl DocumentLoader {
    /// 加载文件或目录（递归）中的所有请求定义
    ///
    /// 无法读取或解析的文件会被跳过并打印警告。
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<RequestDefinition>> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;

        if metadata.is_file() {
            return Ok(Self::load_file_lenient(path));
        }

        let mut definitions = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to walk {}: {}", path.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file() {
                definitions.extend(Self::load_file_lenient(entry.path()));
            }
        }
        Ok(definitions)
    }

    /// 解析单个文件
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<RequestDefinition>> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_content(&content)
    }

    /// 先按 YAML 解析，失败后再按 JSON 解析
    pub fn parse_content(content: &str) -> Result<Vec<RequestDefinition>> {
        match serde_yaml::from_str::<Document>(content) {
            Ok(document) => Ok(document.into()),
            Err(yaml_err) => {
                debug!("Not a YAML document ({}), trying JSON", yaml_err);
                let document: Document = serde_json::from_str(content)?;
                Ok(document.into())
            }
        }
    }

    fn load_file_lenient(path: &Path) -> Vec<RequestDefinition> {
        match Self::load_file(path) {
            Ok(definitions) => {
                debug!("Loaded {} requests from {}", definitions.len(), path.display());
                definitions
            }
            Err(e) => {
                warn!("Skip request file {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
