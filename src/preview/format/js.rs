use super::{FormatError, find_seq, finish, push_line, scan_quoted};

/// `}` 之后如果紧跟这些关键字，保持在同一行
const CONTINUATION_KEYWORDS: [&str; 4] = ["else", "catch", "finally", "while"];

/// 这些关键字之后的 `/` 是正则字面量
const REGEX_PREFIX_KEYWORDS: [&str; 7] = ["return", "typeof", "case", "do", "else", "in", "of"];

/// JavaScript 重排版
///
/// 语句按 `;` 和顶层换行拆分，`{}` 块按层级缩进，字符串、模板字符串、
/// 注释和正则字面量原样保留。
pub fn format_js(source: &str) -> Result<String, FormatError> {
    let chars: Vec<char> = source.chars().collect();
    let mut w = Writer::default();
    // 未闭合的括号及其位置
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                let end = scan_quoted(&chars, i)?;
                w.push_str(&chars[i..=end]);
                i = end + 1;
                continue;
            }
            '`' => {
                let end = scan_template(&chars, i)?;
                w.push_str(&chars[i..=end]);
                i = end + 1;
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                let end = chars[i..]
                    .iter()
                    .position(|&c| c == '\n')
                    .map(|p| p + i)
                    .unwrap_or(chars.len());
                w.push_str(&chars[i..end]);
                w.flush();
                i = end;
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let end = find_seq(&chars, i + 2, "*/").ok_or(FormatError::Unterminated {
                    what: "comment",
                    offset: i,
                })?;
                let multiline = chars[i..end].contains(&'\n');
                if multiline {
                    w.flush();
                    for line in chars[i..end + 2].iter().collect::<String>().lines() {
                        w.line.push_str(line.trim());
                        w.flush();
                    }
                } else {
                    w.push_str(&chars[i..end + 2]);
                }
                i = end + 2;
                continue;
            }
            '/' if w.regex_allowed() => {
                let end = scan_regex(&chars, i)?;
                w.push_str(&chars[i..end]);
                i = end;
                continue;
            }
            '{' => {
                let close = next_significant(&chars, i + 1);
                if close.map(|j| chars[j]) == Some('}') {
                    // 空块直接写成 `{}`
                    w.space();
                    w.line.push_str("{}");
                    i = close.unwrap_or(i) + 1;
                    continue;
                }
                w.space();
                w.line.push('{');
                w.flush();
                stack.push(('{', i));
                w.depth += 1;
            }
            '}' => {
                match stack.pop() {
                    Some(('{', _)) => {}
                    _ => return Err(FormatError::Unbalanced { found: c, offset: i }),
                }
                w.flush();
                w.depth -= 1;
                w.line.push('}');
                match continues_after_block(&chars, i + 1) {
                    Some(true) => w.line.push(' '),
                    Some(false) => {}
                    None => w.flush(),
                }
            }
            '(' | '[' => {
                w.line.push(c);
                stack.push((c, i));
            }
            ')' | ']' => {
                let expected = if c == ')' { '(' } else { '[' };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => return Err(FormatError::Unbalanced { found: c, offset: i }),
                }
                w.trim_trailing_space();
                w.line.push(c);
            }
            ';' => {
                w.trim_trailing_space();
                w.line.push(';');
                if in_parens(&stack) {
                    w.line.push(' ');
                } else {
                    w.flush();
                }
            }
            ',' => {
                w.trim_trailing_space();
                w.line.push_str(", ");
            }
            '\n' if !in_parens(&stack) => w.flush(),
            c if c.is_whitespace() => w.space(),
            _ => w.line.push(c),
        }
        i += 1;
    }

    if let Some(&(open, offset)) = stack.last() {
        return Err(FormatError::Unclosed { open, offset });
    }
    w.flush();
    Ok(finish(w.out))
}

#[derive(Default)]
struct Writer {
    out: String,
    line: String,
    depth: usize,
    /// 最近一次刷新之前的最后一个有效字符
    last: Option<char>,
    last_word: String,
}

impl Writer {
    fn push_str(&mut self, chars: &[char]) {
        self.line.extend(chars);
    }

    fn space(&mut self) {
        if !self.line.is_empty() && !self.line.ends_with(' ') {
            self.line.push(' ');
        }
    }

    fn trim_trailing_space(&mut self) {
        while self.line.ends_with(' ') {
            self.line.pop();
        }
    }

    fn flush(&mut self) {
        let line = self.line.trim();
        if !line.is_empty() {
            self.last = line.chars().last();
            self.last_word = trailing_word(line);
            push_line(&mut self.out, self.depth, line);
        }
        self.line.clear();
    }

    /// 根据前一个有效 token 判断 `/` 是除号还是正则
    fn regex_allowed(&self) -> bool {
        let current = self.line.trim_end();
        let (last, word) = if current.is_empty() {
            (self.last, self.last_word.clone())
        } else {
            (current.chars().last(), trailing_word(current))
        };
        match last {
            None => true,
            Some(c) if "(,=:[!&|?{};+-*%<>~^".contains(c) => true,
            Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {
                REGEX_PREFIX_KEYWORDS.contains(&word.as_str())
            }
            _ => false,
        }
    }
}

fn trailing_word(s: &str) -> String {
    let word: String = s
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    word.chars().rev().collect()
}

fn in_parens(stack: &[(char, usize)]) -> bool {
    matches!(stack.last(), Some(('(', _)) | Some(('[', _)))
}

fn next_significant(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len()).find(|&j| !chars[j].is_whitespace())
}

/// `});`、`} else`、`},` 之类保持在同一行
///
/// `None` 表示换行，`Some(true)` 表示接关键字，需要补一个空格
fn continues_after_block(chars: &[char], from: usize) -> Option<bool> {
    let j = next_significant(chars, from)?;
    if matches!(chars[j], ';' | ',' | ')' | ']' | '.') {
        return Some(false);
    }
    let rest: String = chars[j..].iter().take(9).collect();
    let keyword = CONTINUATION_KEYWORDS.iter().any(|kw| {
        rest.starts_with(kw)
            && !rest[kw.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
    });
    keyword.then_some(true)
}

/// 模板字符串，支持 `${}` 中的嵌套
fn scan_template(chars: &[char], start: usize) -> Result<usize, FormatError> {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '`' => return Ok(i),
            '$' if chars.get(i + 1) == Some(&'{') => {
                i = scan_template_expr(chars, i + 2)? + 1;
            }
            _ => i += 1,
        }
    }
    Err(FormatError::Unterminated {
        what: "template literal",
        offset: start,
    })
}

/// 返回 `${...}` 结束 `}` 的位置
fn scan_template_expr(chars: &[char], start: usize) -> Result<usize, FormatError> {
    let mut depth = 0usize;
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '"' | '\'' => i = scan_quoted(chars, i)?,
            '`' => i = scan_template(chars, i)?,
            '{' => depth += 1,
            '}' if depth == 0 => return Ok(i),
            '}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    Err(FormatError::Unterminated {
        what: "template expression",
        offset: start,
    })
}

/// 正则字面量，返回 flags 之后的位置
fn scan_regex(chars: &[char], start: usize) -> Result<usize, FormatError> {
    let mut i = start + 1;
    let mut in_class = false;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '\n' => break,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                return Ok(i);
            }
            _ => {}
        }
        i += 1;
    }
    Err(FormatError::Unterminated {
        what: "regular expression",
        offset: start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minified_function() {
        let out = format_js("function a(x,y){if(x){return y}else{return 0}}a(1,2);").unwrap();
        assert_eq!(
            out,
            "function a(x, y) {\n  if(x) {\n    return y\n  } else {\n    return 0\n  }\n}\na(1, 2);\n"
        );
    }

    #[test]
    fn test_for_loop_keeps_semicolons_inline() {
        let out = format_js("for(var i=0;i<3;i++){f(i)}").unwrap();
        assert_eq!(out, "for(var i=0; i<3; i++) {\n  f(i)\n}\n");
    }

    #[test]
    fn test_callback_closing() {
        let out = format_js("on('x',function(){go()});").unwrap();
        assert_eq!(out, "on('x', function() {\n  go()\n});\n");
    }

    #[test]
    fn test_empty_block() {
        let out = format_js("try{run()}catch(e){}").unwrap();
        assert_eq!(out, "try {\n  run()\n} catch(e) {}\n");
    }

    #[test]
    fn test_strings_and_regex_untouched() {
        let out = format_js("var s=\"{;}\";var r=/[/]{2};/g;").unwrap();
        assert_eq!(out, "var s=\"{;}\";\nvar r=/[/]{2};/g;\n");
    }

    #[test]
    fn test_division_is_not_regex() {
        let out = format_js("var a=b/2/c;").unwrap();
        assert_eq!(out, "var a=b/2/c;\n");
    }

    #[test]
    fn test_template_literal_with_braces() {
        let out = format_js("const t=`a ${ {b:1}.b } }`;").unwrap();
        assert_eq!(out, "const t=`a ${ {b:1}.b } }`;\n");
    }

    #[test]
    fn test_newlines_split_statements() {
        let out = format_js("let a = 1\nlet b = 2\n").unwrap();
        assert_eq!(out, "let a = 1\nlet b = 2\n");
    }

    #[test]
    fn test_line_comment() {
        let out = format_js("a(); // note\nb();").unwrap();
        assert_eq!(out, "a();\n// note\nb();\n");
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            format_js("f(a]").unwrap_err(),
            FormatError::Unbalanced { found: ']', .. }
        ));
        assert!(matches!(
            format_js("if (a) { b()").unwrap_err(),
            FormatError::Unclosed { open: '{', .. }
        ));
        assert!(matches!(
            format_js("var s = 'abc").unwrap_err(),
            FormatError::Unterminated { what: "string", .. }
        ));
    }
}
