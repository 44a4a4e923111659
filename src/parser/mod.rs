pub mod loader;
pub mod resolve;
pub mod types;

// Re-export commonly used types
pub use loader::DocumentLoader;
pub use resolve::{DisplayOptions, ResolvedRequest};
pub use types::{Body, BodyKind, CertConfig, FilePart, FormDataField, MultiMap, RequestDefinition};

/// 从文件或目录加载请求定义
pub fn load_path<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Vec<RequestDefinition>> {
    DocumentLoader::load_path(path)
}

/// 从字符串内容解析请求定义
pub fn parse_content(content: &str) -> crate::Result<Vec<RequestDefinition>> {
    DocumentLoader::parse_content(content)
}
