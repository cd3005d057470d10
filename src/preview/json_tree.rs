use serde_json::Value;

const INDENT_WIDTH: usize = 2;

/// 结构化 JSON 树，超过展开深度的容器折叠显示
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTree {
    root: Value,
}

impl JsonTree {
    /// 空文本或缺失文本按 `{}` 处理
    pub fn parse(text: Option<&str>) -> Result<Self, serde_json::Error> {
        let text = text.unwrap_or("");
        let root = if text.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(text)?
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// 深度小于 `expand_depth` 的容器展开
    pub fn render(&self, expand_depth: usize) -> String {
        let mut out = String::new();
        write_value(&mut out, &self.root, 0, expand_depth);
        out
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize, expand_depth: usize) {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) if depth >= expand_depth => {
            out.push_str(&format!("{{…}} {}", plural(map.len(), "key")));
        }
        Value::Array(items) if depth >= expand_depth => {
            out.push_str(&format!("[…] {}", plural(items.len(), "item")));
        }
        Value::Object(map) => {
            out.push_str("{\n");
            for (n, (key, child)) in map.iter().enumerate() {
                indent(out, depth + 1);
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push_str(": ");
                write_value(out, child, depth + 1, expand_depth);
                if n + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            indent(out, depth);
            out.push('}');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            for (n, child) in items.iter().enumerate() {
                indent(out, depth + 1);
                write_value(out, child, depth + 1, expand_depth);
                if n + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            indent(out, depth);
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn indent(out: &mut String, depth: usize) {
    out.push_str(&" ".repeat(depth * INDENT_WIDTH));
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
