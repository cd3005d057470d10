use super::{FormatError, collapse_whitespace, find_seq, finish, push_line, scan_quoted};

/// CSS 重排版：每条声明一行，块按层级缩进，顶层规则之间空一行
pub fn format_css(source: &str) -> Result<String, FormatError> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::new();
    let mut buf = String::new();
    // 每个未闭合 `{` 的位置
    let mut open: Vec<usize> = Vec::new();
    // url(...) 里的 `;` 不是声明结束
    let mut parens = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                let end = scan_quoted(&chars, i)?;
                buf.extend(&chars[i..=end]);
                i = end + 1;
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let end = find_seq(&chars, i + 2, "*/").ok_or(FormatError::Unterminated {
                    what: "comment",
                    offset: i,
                })?;
                let comment: String = chars[i..end + 2].iter().collect();
                if buf.trim().is_empty() {
                    push_line(&mut out, open.len(), &comment);
                } else {
                    buf.push_str(&comment);
                }
                i = end + 2;
                continue;
            }
            '(' => {
                parens += 1;
                buf.push(c);
            }
            ')' => {
                parens = parens.saturating_sub(1);
                buf.push(c);
            }
            _ if parens > 0 => buf.push(c),
            '{' => {
                let selector = collapse_whitespace(&buf);
                let header = if selector.is_empty() {
                    "{".to_string()
                } else {
                    format!("{} {{", selector)
                };
                push_line(&mut out, open.len(), &header);
                buf.clear();
                open.push(i);
            }
            ';' => {
                flush_declaration(&mut out, &mut buf, open.len());
            }
            '}' => {
                if open.pop().is_none() {
                    return Err(FormatError::Unbalanced {
                        found: '}',
                        offset: i,
                    });
                }
                // 最后一条声明可以省略分号
                flush_declaration(&mut out, &mut buf, open.len() + 1);
                push_line(&mut out, open.len(), "}");
                if open.is_empty() {
                    out.push('\n');
                }
            }
            _ => buf.push(c),
        }
        i += 1;
    }

    if let Some(&offset) = open.last() {
        return Err(FormatError::Unclosed { open: '{', offset });
    }
    let rest = collapse_whitespace(&buf);
    push_line(&mut out, 0, &rest);

    Ok(finish(out))
}

fn flush_declaration(out: &mut String, buf: &mut String, depth: usize) {
    let decl = collapse_whitespace(buf);
    buf.clear();
    if decl.is_empty() {
        return;
    }
    let line = match decl.split_once(':') {
        Some((name, value)) if depth > 0 => format!("{}: {};", name.trim(), value.trim()),
        _ => format!("{};", decl),
    };
    push_line(out, depth, &line);
}
