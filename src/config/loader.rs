use crate::config::types::ViewerConfig;
use crate::{HarviewError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "harview.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ViewerConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            HarviewError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| HarviewError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// 解析最终生效的配置
    ///
    /// 显式指定的路径读取失败时报错；自动查找失败时使用默认值
    pub fn resolve(explicit: Option<&Path>) -> Result<ViewerConfig> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::find_and_load().unwrap_or_default()),
        }
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/harview/
    pub fn find_and_load() -> Option<ViewerConfig> {
        let path = Self::find_in_ancestors(std::env::current_dir().ok()?)
            .or_else(Self::user_config_path)?;
        debug!("Using config file {}", path.display());

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                None
            }
        }
    }

    /// 从 `start` 开始向上查找配置文件
    fn find_in_ancestors(start: PathBuf) -> Option<PathBuf> {
        let mut current = start;
        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            // 尝试父目录
            if !current.pop() {
                return None;
            }
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("harview").join(Self::CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }
}
