use crate::Result;
use crate::har::model::Archive;
use std::path::Path;
use tracing::{debug, info};

/// HAR 文件加载器
///
/// 不做缓存：同一路径每次都重新读取、重新解析
pub struct HarLoader;

impl HarLoader {
    /// 异步加载
    ///
    /// - `None` 路径返回 `Ok(None)`，不是错误
    /// - 读取失败返回 `HarviewError::Io`，消息原样透传
    /// - 解析失败返回 `HarviewError::Json`
    pub async fn load(path: Option<&Path>) -> Result<Option<Archive>> {
        let Some(path) = path else {
            return Ok(None);
        };

        debug!("Reading HAR file {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let archive = Self::parse(&content)?;
        info!(
            "Loaded {} entries from {}",
            archive.len(),
            path.display()
        );
        Ok(Some(archive))
    }

    /// 同步版本，供测试和非交互命令使用
    pub fn load_blocking(path: Option<&Path>) -> Result<Option<Archive>> {
        let Some(path) = path else {
            return Ok(None);
        };

        debug!("Reading HAR file {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let archive = Self::parse(&content)?;
        info!(
            "Loaded {} entries from {}",
            archive.len(),
            path.display()
        );
        Ok(Some(archive))
    }

    /// 从字符串解析 HAR 文档
    pub fn parse(content: &str) -> Result<Archive> {
        // 部分导出工具会写入 UTF-8 BOM
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HarviewError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_path_is_not_an_error() {
        let result = HarLoader::load_blocking(None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = HarLoader::load_blocking(Some(Path::new("/definitely/not/here.har"))).unwrap_err();
        assert!(matches!(err, HarviewError::Io(_)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        file.flush().unwrap();

        let err = HarLoader::load_blocking(Some(file.path())).unwrap_err();
        assert!(matches!(err, HarviewError::Json(_)));
    }

    #[test]
    fn test_parse_with_bom() {
        let archive = HarLoader::parse("\u{feff}{\"log\":{\"entries\":[]}}").unwrap();
        assert!(archive.is_empty());
    }

    #[test]
    fn test_null_fields_do_not_reject_archive() {
        let archive = HarLoader::parse(
            r#"{"log":{"entries":[
                {"request":{"method":"GET","url":"https://a/ok"},"response":{"status":200,"content":{"mimeType":"text/css"}}},
                {"request":{"method":"GET","url":"https://a/odd","queryString":null},"response":{"status":null,"content":{"mimeType":null}}}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(archive.len(), 2);
        let odd = archive.entry(1).unwrap();
        assert_eq!(odd.response.status, 0);
        assert_eq!(odd.response.content.mime_type, "");
        assert!(odd.request.query_string.is_empty());
    }

    #[tokio::test]
    async fn test_async_load() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"log":{"entries":[{"request":{"method":"GET","url":"https://a/b"}}]}}"#)
            .unwrap();
        file.flush().unwrap();

        let archive = HarLoader::load(Some(file.path())).await.unwrap().unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.entries()[0].request.url, "https://a/b");
    }
}
