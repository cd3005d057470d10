use harview::{HarviewError, Result};

#[test]
fn test_config_error() {
    let err = HarviewError::Config("bad value".to_string());
    assert_eq!(err.to_string(), "配置错误: bad value");
    assert_eq!(err.kind(), "Config error");
}

#[test]
fn test_invalid_argument() {
    let err: HarviewError = "fonts".parse::<harview::view::Filter>().unwrap_err();
    assert!(matches!(err, HarviewError::InvalidArgument(_)));
    assert!(err.to_string().starts_with("无效的参数: unknown filter 'fonts'"));
}

#[test]
fn test_io_message_is_forwarded() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err: HarviewError = io.into();
    assert_eq!(err.to_string(), "no such file");
    assert_eq!(err.kind(), "I/O error");
}

#[test]
fn test_error_conversion_from_anyhow() {
    let anyhow_err = anyhow::anyhow!("test anyhow error");
    let harview_err: HarviewError = anyhow_err.into();
    assert!(harview_err.to_string().contains("test anyhow error"));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(HarviewError::Other("test".to_string()))
    }

    match returns_error() {
        Err(HarviewError::Other(msg)) => assert_eq!(msg, "test"),
        _ => panic!("Expected Other"),
    }
}
