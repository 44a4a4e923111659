use crate::{LikError, Result};
use reqwest::Identity;
use std::fs;
use tracing::debug;

/// PEM 文件中的一个块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// `-----BEGIN <label>-----` 中的 label
    pub label: String,
    /// 含 BEGIN/END 行的完整文本
    pub pem: String,
}

/// 按顺序切分拼接在一起的 PEM 块，未闭合的块被忽略
pub fn parse_pem_blocks(text: &str) -> Vec<PemBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines().map(str::trim) {
        match current.take() {
            None => {
                if let Some(label) = line
                    .strip_prefix("-----BEGIN ")
                    .and_then(|rest| rest.strip_suffix("-----"))
                {
                    current = Some((label.to_string(), vec![line]));
                }
            }
            Some((label, mut lines)) => {
                lines.push(line);
                if line == format!("-----END {}-----", label) {
                    let mut pem = lines.join("\n");
                    pem.push('\n');
                    blocks.push(PemBlock { label, pem });
                } else {
                    current = Some((label, lines));
                }
            }
        }
    }
    blocks
}

/// 从 PEM 块中挑出私钥与证书，同类多个时最后一个生效
pub fn select_key_and_certificate(blocks: &[PemBlock]) -> (Option<&str>, Option<&str>) {
    let mut key = None;
    let mut certificate = None;
    for block in blocks {
        if block.label.ends_with("PRIVATE KEY") {
            key = Some(block.pem.as_str());
        }
        if block.label.ends_with("CERTIFICATE") {
            certificate = Some(block.pem.as_str());
        }
    }
    (key, certificate)
}

/// 读取包含客户端私钥与证书的 PEM 文件，构建 mTLS 身份
///
/// 路径为空时返回 `None`。文件不可读或找不到私钥/证书时返回
/// [`LikError::ClientCert`]，该错误会终止整个运行。私钥与证书是否匹配
/// 要到构建客户端时才能确定，见 [`crate::http::HttpClient::for_request`]。
pub fn load_client_identity(path: &str) -> Result<Option<Identity>> {
    if path.is_empty() {
        return Ok(None);
    }

    let client_cert_error = |message: String| LikError::ClientCert {
        path: path.to_string(),
        message,
    };

    let text = fs::read_to_string(path)
        .map_err(|e| client_cert_error(format!("failed to read client certificate file: {}", e)))?;
    let blocks = parse_pem_blocks(&text);
    debug!("Found {} PEM blocks in {}", blocks.len(), path);

    let (key, certificate) = select_key_and_certificate(&blocks);
    let key = key.ok_or_else(|| client_cert_error("no private key found".to_string()))?;
    let certificate =
        certificate.ok_or_else(|| client_cert_error("no certificate found".to_string()))?;

    // PKCS#8、PKCS#1（RSA）与 SEC1（EC）私钥都由 rustls 识别
    let pair = format!("{}{}", certificate, key);
    let identity = Identity::from_pem(pair.as_bytes())
        .map_err(|e| client_cert_error(format!("unable to load client cert and key pair: {}", e)))?;
    Ok(Some(identity))
}
