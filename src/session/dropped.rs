use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static HAR_FILE: OnceLock<Regex> = OnceLock::new();

/// 文件名是否以 `.har` 结尾（不区分大小写）
pub fn is_har_path(path: &Path) -> bool {
    let re = HAR_FILE.get_or_init(|| Regex::new(r"(?i)\.har$").unwrap());
    path.file_name()
        .map(|name| re.is_match(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// 拖入的文件中只保留 HAR 文件，其余静默忽略
pub fn accept_dropped(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|p| is_har_path(p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_har_path() {
        assert!(is_har_path(Path::new("/tmp/a.har")));
        assert!(is_har_path(Path::new("B.HAR")));
        assert!(!is_har_path(Path::new("a.har.json")));
        assert!(!is_har_path(Path::new("/tmp/har")));
        assert!(!is_har_path(Path::new("/")));
    }

    #[test]
    fn test_accept_dropped_keeps_order() {
        let dropped = vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.HAR"),
            PathBuf::from("c.har"),
        ];
        assert_eq!(
            accept_dropped(&dropped),
            vec![PathBuf::from("b.HAR"), PathBuf::from("c.har")]
        );
    }
}
