use crate::http::Response;
use crate::parser::ResolvedRequest;
use serde::de::IgnoredAny;

const SEPARATOR: &str = "---------------";
const JSON_INDENT: &str = "    ";

/// 响应渲染器
///
/// 按固定顺序输出：分隔行、URL、状态码、耗时、Headers、Body，
/// 每一项是否输出由 [`crate::parser::DisplayOptions`] 决定。
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseRenderer;

impl ResponseRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, request: &ResolvedRequest, response: &Response) -> String {
        let display = request.display;
        let mut output = Vec::new();

        output.push(format!(
            "{}{} {}{}",
            SEPARATOR, request.namespace, request.name, SEPARATOR
        ));
        if display.show_url {
            output.push(request.url.clone());
        }
        if display.show_code {
            output.push(response.status.to_string());
        }
        if display.show_time_consumption {
            output.push(format!("{:?}", response.duration));
        }
        if display.show_header {
            output.push("Headers:".to_string());
            for key in response.headers.keys() {
                let values: Vec<_> = response
                    .headers
                    .get_all(key)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect();
                output.push(format!("  {}: {}", key, values.join(", ")));
            }
        }
        if display.show_body {
            output.push(self.format_body(response));
        }

        let mut text = output.join("\n");
        text.push('\n');
        text
    }

    /// 按 Content-Type 格式化 body，失败时输出原始内容
    pub fn format_body(&self, response: &Response) -> String {
        match response.media_type().as_deref() {
            Some("application/json") => self
                .try_format_json(&response.body)
                .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).into_owned()),
            Some("text/html") => {
                html_escape::decode_html_entities(&String::from_utf8_lossy(&response.body))
                    .into_owned()
            }
            _ => String::from_utf8_lossy(&response.body).into_owned(),
        }
    }

    /// 4 空格缩进，只调整空白，key 顺序与数字写法保持原样
    fn try_format_json(&self, body: &[u8]) -> serde_json::Result<String> {
        serde_json::from_slice::<IgnoredAny>(body)?;
        Ok(indent_json(&String::from_utf8_lossy(body), JSON_INDENT))
    }
}

fn is_json_whitespace(c: &char) -> bool {
    matches!(*c, ' ' | '\t' | '\n' | '\r')
}

fn push_newline(out: &mut String, depth: usize, indent: &str) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}

/// 重新缩进一段合法的 JSON 文本，空对象与空数组保持 `{}` / `[]`
fn indent_json(text: &str, indent: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            c if is_json_whitespace(&c) => {}
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                while chars.next_if(is_json_whitespace).is_some() {}
                if let Some(close) = chars.next_if(|next| matches!(*next, '}' | ']')) {
                    out.push(close);
                } else {
                    depth += 1;
                    push_newline(&mut out, depth, indent);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                push_newline(&mut out, depth, indent);
                out.push(c);
            }
            ',' => {
                out.push(c);
                push_newline(&mut out, depth, indent);
            }
            ':' => out.push_str(": "),
            other => out.push(other),
        }
    }
    out
}
