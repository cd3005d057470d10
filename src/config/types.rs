use crate::view::Filter;
use serde::{Deserialize, Serialize};

/// 完整的配置文件 `harview.toml`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// 显示相关
    pub display: DisplayConfig,

    /// 交互模式相关
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 是否输出颜色
    pub color: bool,

    /// JSON 预览默认展开的层数
    pub json_expand_depth: usize,

    /// 启动时的过滤条件
    pub default_filter: Filter,

    /// 图片 data URI 在终端里最多显示的字符数
    pub data_uri_preview_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            json_expand_depth: 3,
            default_filter: Filter::All,
            data_uri_preview_chars: 96,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// 选择列表每页显示的条数
    pub page_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self { page_size: 15 }
    }
}
