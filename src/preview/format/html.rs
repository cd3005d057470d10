use super::{FormatError, collapse_whitespace, find_seq, finish, format_css, format_js, push_line};
use tracing::debug;

/// 没有闭合标签的元素
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// 内容不按 HTML 解析的元素
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "pre", "textarea"];

/// HTML 重排版：每个节点一行，按嵌套层级缩进
///
/// `<script>` 和 `<style>` 的内容交给 JS / CSS 格式化器，失败时保留原文；
/// `<pre>` 和 `<textarea>` 原样输出。
pub fn format_html(source: &str) -> Result<String, FormatError> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::new();
    let mut open: Vec<String> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '<' {
            let end = (i..chars.len()).find(|&j| chars[j] == '<').unwrap_or(chars.len());
            let text: String = chars[i..end].iter().collect();
            push_line(&mut out, open.len(), &collapse_whitespace(&text));
            i = end;
            continue;
        }

        let next = chars.get(i + 1).copied();
        match next {
            Some('!') if starts_with(&chars, i, "<!--") => {
                let end = find_seq(&chars, i + 4, "-->").ok_or(FormatError::Unterminated {
                    what: "comment",
                    offset: i,
                })?;
                let comment: String = chars[i..end + 3].iter().collect();
                push_line(&mut out, open.len(), &comment);
                i = end + 3;
            }
            Some('!') | Some('?') => {
                let end = find_tag_end(&chars, i)?;
                let decl: String = chars[i..=end].iter().collect();
                push_line(&mut out, open.len(), &collapse_whitespace(&decl));
                i = end + 1;
            }
            Some('/') => {
                let end = find_tag_end(&chars, i)?;
                let name = tag_name(&chars[i + 2..end]);
                let Some(pos) = open.iter().rposition(|n| *n == name) else {
                    return Err(FormatError::MismatchedTag { found: name });
                };
                // 匹配到祖先元素时，中间未闭合的元素被隐式关闭
                open.truncate(pos);
                push_line(&mut out, open.len(), &format!("</{}>", name));
                i = end + 1;
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let end = find_tag_end(&chars, i)?;
                let raw: String = chars[i..=end].iter().collect();
                let name = tag_name(&chars[i + 1..end]);
                let tag = collapse_whitespace(&raw);
                i = end + 1;

                let self_closing = raw.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str());
                if self_closing {
                    push_line(&mut out, open.len(), &tag);
                } else if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    i = write_raw_element(&mut out, &chars, i, open.len(), &name, &tag)?;
                } else {
                    push_line(&mut out, open.len(), &tag);
                    open.push(name);
                }
            }
            _ => {
                // 单独的 `<` 按文本处理
                let end = (i + 1..chars.len())
                    .find(|&j| chars[j] == '<')
                    .unwrap_or(chars.len());
                let text: String = chars[i..end].iter().collect();
                push_line(&mut out, open.len(), &collapse_whitespace(&text));
                i = end;
            }
        }
    }

    Ok(finish(out))
}

/// 输出 script/style/pre/textarea，返回闭合标签之后的位置
fn write_raw_element(
    out: &mut String,
    chars: &[char],
    body_start: usize,
    depth: usize,
    name: &str,
    open_tag: &str,
) -> Result<usize, FormatError> {
    let close = find_closing_tag(chars, body_start, name).ok_or(FormatError::Unterminated {
        what: "element",
        offset: body_start,
    })?;
    let close_end = find_tag_end(chars, close)?;
    let body: String = chars[body_start..close].iter().collect();
    let close_tag = format!("</{}>", name);

    if name == "pre" || name == "textarea" {
        for _ in 0..depth {
            out.push_str(super::INDENT);
        }
        out.push_str(open_tag);
        out.push_str(&body);
        out.push_str(&close_tag);
        out.push('\n');
        return Ok(close_end + 1);
    }

    push_line(out, depth, open_tag);
    if !body.trim().is_empty() {
        let formatted = match name {
            "script" if is_javascript(open_tag) => format_js(&body),
            "style" => format_css(&body),
            _ => Ok(body.clone()),
        };
        let text = formatted.unwrap_or_else(|e| {
            debug!("Embedded <{}> left unformatted: {}", name, e);
            body.clone()
        });
        write_block(out, depth + 1, &text);
    }
    push_line(out, depth, &close_tag);
    Ok(close_end + 1)
}

/// 去掉公共缩进后逐行输出，保留相对缩进
fn write_block(out: &mut String, depth: usize, text: &str) {
    let common = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        for _ in 0..depth {
            out.push_str(super::INDENT);
        }
        out.push_str(line.get(common..).unwrap_or(line.trim_start()).trim_end());
        out.push('\n');
    }
}

/// 没有 type 或 type 是 JavaScript / module 的脚本才格式化
fn is_javascript(open_tag: &str) -> bool {
    let lower = open_tag.to_ascii_lowercase();
    match lower.find("type=") {
        None => true,
        Some(pos) => {
            let value = &lower[pos + 5..];
            value.contains("javascript") || value.contains("module")
        }
    }
}

fn starts_with(chars: &[char], at: usize, prefix: &str) -> bool {
    prefix
        .chars()
        .enumerate()
        .all(|(k, p)| chars.get(at + k) == Some(&p))
}

/// 找到标签结束的 `>`，跳过引号中的内容
fn find_tag_end(chars: &[char], start: usize) -> Result<usize, FormatError> {
    let mut quote: Option<char> = None;
    for (j, &c) in chars.iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Ok(j),
            None => {}
        }
    }
    Err(FormatError::Unterminated {
        what: "tag",
        offset: start,
    })
}

/// 标签名，小写
fn tag_name(inner: &[char]) -> String {
    inner
        .iter()
        .skip_while(|c| c.is_whitespace())
        .take_while(|c| !c.is_whitespace() && **c != '/' && **c != '>')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// 不区分大小写地查找 `</name`
fn find_closing_tag(chars: &[char], from: usize, name: &str) -> Option<usize> {
    let needle: Vec<char> = format!("</{}", name).chars().collect();
    (from..chars.len()).find(|&j| {
        chars.len() - j >= needle.len()
            && chars[j..j + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
            && chars
                .get(j + needle.len())
                .is_none_or(|c| c.is_whitespace() || *c == '>')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_elements() {
        let out = format_html("<!DOCTYPE html><html><body><p>Hello   <b>world</b></p></body></html>")
            .unwrap();
        assert_eq!(
            out,
            "<!DOCTYPE html>\n<html>\n  <body>\n    <p>\n      Hello\n      <b>\n        world\n      </b>\n    </p>\n  </body>\n</html>\n"
        );
    }

    #[test]
    fn test_void_and_self_closing() {
        let out = format_html("<div><br><img src=\"a.png\"><x-icon/></div>").unwrap();
        assert_eq!(
            out,
            "<div>\n  <br>\n  <img src=\"a.png\">\n  <x-icon/>\n</div>\n"
        );
    }

    #[test]
    fn test_implicit_close() {
        let out = format_html("<ul><li>a<li>b</ul>").unwrap();
        assert_eq!(out, "<ul>\n  <li>\n    a\n    <li>\n      b\n</ul>\n");
    }

    #[test]
    fn test_embedded_script_and_style() {
        let out = format_html("<head><style>a{color:red}</style><script>f(1,2);</script></head>")
            .unwrap();
        assert_eq!(
            out,
            "<head>\n  <style>\n    a {\n      color: red;\n    }\n  </style>\n  <script>\n    f(1, 2);\n  </script>\n</head>\n"
        );
    }

    #[test]
    fn test_json_script_not_formatted_as_js() {
        let out = format_html("<script type=\"application/ld+json\">{\"a\":1}</script>").unwrap();
        assert!(out.contains("  {\"a\":1}\n"));
    }

    #[test]
    fn test_pre_is_verbatim() {
        let out = format_html("<div><pre>  a\n   b</pre></div>").unwrap();
        assert_eq!(out, "<div>\n  <pre>  a\n   b</pre>\n</div>\n");
    }

    #[test]
    fn test_attribute_with_gt() {
        let out = format_html("<a title=\"x > y\">t</a>").unwrap();
        assert_eq!(out, "<a title=\"x > y\">\n  t\n</a>\n");
    }

    #[test]
    fn test_mismatched_close() {
        assert_eq!(
            format_html("<div></span></div>").unwrap_err(),
            FormatError::MismatchedTag {
                found: "span".to_string()
            }
        );
    }

    #[test]
    fn test_unterminated() {
        assert!(matches!(
            format_html("<div class=\"a").unwrap_err(),
            FormatError::Unterminated { what: "tag", .. }
        ));
        assert!(matches!(
            format_html("<!-- never").unwrap_err(),
            FormatError::Unterminated { what: "comment", .. }
        ));
        assert!(matches!(
            format_html("<script>var a = 1;").unwrap_err(),
            FormatError::Unterminated { what: "element", .. }
        ));
    }

    #[test]
    fn test_stray_lt_is_text() {
        let out = format_html("<p>1 < 2</p>").unwrap();
        assert_eq!(out, "<p>\n  1\n  < 2\n</p>\n");
    }
}
