use crate::config::types::LikConfig;
use crate::{LikError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名（不含扩展名）
    const CONFIG_NAME: &'static str = "lik";
    /// 项目内配置目录
    const CONFIG_DIR: &'static str = "config";
    /// 按顺序尝试的扩展名
    const EXTENSIONS: [&'static str; 4] = ["yaml", "yml", "json", "toml"];

    /// 从指定路径加载配置文件，格式由扩展名决定
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<LikConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config: LikConfig = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            other => {
                return Err(LikError::ParseError(format!(
                    "unsupported config format '{}' for {}",
                    other,
                    path.display()
                )));
            }
        };

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. ./config/lik.{yaml,yml,json,toml}
    /// 2. 用户配置目录 ~/.config/lik/
    ///
    /// 都不存在时返回空配置
    pub fn find_and_load() -> Result<LikConfig> {
        let mut search_dirs = vec![PathBuf::from(Self::CONFIG_DIR)];
        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home.join(".config").join(Self::CONFIG_NAME));
        }

        match Self::find_in(&search_dirs) {
            Some(path) => Self::load_from_path(path),
            None => {
                debug!("No config file found, using defaults");
                Ok(LikConfig::default())
            }
        }
    }

    /// 返回第一个存在的配置文件路径
    fn find_in(dirs: &[PathBuf]) -> Option<PathBuf> {
        dirs.iter()
            .flat_map(|dir| {
                Self::EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{}.{}", Self::CONFIG_NAME, ext)))
            })
            .find(|path| path.is_file())
    }
}
