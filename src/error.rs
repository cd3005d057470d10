use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarviewError {
    /// 文件读取失败，原始消息原样透传
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// 内容不是合法的 JSON 或不是 HAR 结构
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("交互失败: {0}")]
    Interaction(String),

    #[error("无效的参数: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl HarviewError {
    /// 错误类别的简短名称，用于弹出提示的标题
    pub fn kind(&self) -> &'static str {
        match self {
            HarviewError::Io(_) => "I/O error",
            HarviewError::Json(_) => "Parse error",
            HarviewError::Config(_) => "Config error",
            HarviewError::Interaction(_) => "Interaction error",
            HarviewError::InvalidArgument(_) => "Invalid argument",
            HarviewError::Other(_) => "Error",
        }
    }
}

impl From<anyhow::Error> for HarviewError {
    fn from(err: anyhow::Error) -> Self {
        HarviewError::Other(err.to_string())
    }
}

impl From<inquire::InquireError> for HarviewError {
    fn from(err: inquire::InquireError) -> Self {
        HarviewError::Interaction(err.to_string())
    }
}

/// Result type for harview crate
pub type Result<T> = std::result::Result<T, HarviewError>;
