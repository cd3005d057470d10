use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// 内联图片：data URI 和解码后的字节数
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime: String,
    pub data_uri: String,
    pub decoded_len: Option<usize>,
}

impl InlineImage {
    /// 声明了编码时直接拼接，否则把文本做 base64 编码
    pub fn new(mime: &str, encoding: Option<&str>, data: &str) -> Self {
        match encoding {
            Some(enc) => {
                let decoded_len = if enc.eq_ignore_ascii_case("base64") {
                    STANDARD.decode(data.trim()).ok().map(|bytes| bytes.len())
                } else {
                    None
                };
                Self {
                    mime: mime.to_string(),
                    data_uri: format!("data:{};{},{}", mime, enc, data),
                    decoded_len,
                }
            }
            None => Self {
                mime: mime.to_string(),
                data_uri: format!("data:{};base64,{}", mime, STANDARD.encode(data)),
                decoded_len: Some(data.len()),
            },
        }
    }

    /// 截断过长的 URI 用于终端显示
    pub fn uri_preview(&self, max_chars: usize) -> String {
        if self.data_uri.chars().count() <= max_chars {
            return self.data_uri.clone();
        }
        let head: String = self.data_uri.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}
