//! `multipart/form-data` 请求体构造
//!
//! 格式:
//!
//! ```text
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="image"; filename="1.jpg"\r\n
//! Content-Type: image/jpg\r\n
//! \r\n
//! <bytes>\r\n
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="wxid"\r\n
//! \r\n
//! <value>\r\n
//! --<boundary>--\r\n
//! ```

use rand::Rng;

/// 转义 quoted-string 中的反斜杠和双引号
pub fn escape_quotes(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn random_boundary() -> String {
    let mut bytes = [0u8; 30];
    rand::thread_rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// multipart 请求体
pub struct FormBody {
    boundary: String,
    buf: Vec<u8>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::with_boundary(random_boundary())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// 请求头中的 Content-Type
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    fn begin_part(&mut self, disposition: &str, content_type: Option<&str>) {
        if !self.buf.is_empty() {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf
            .extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        if let Some(content_type) = content_type {
            self.buf
                .extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        self.buf.extend_from_slice(b"\r\n");
    }

    /// 添加文件部分
    pub fn add_file_part(
        &mut self,
        field_name: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> &mut Self {
        let disposition = format!(
            "form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(field_name),
            escape_quotes(filename)
        );
        self.begin_part(&disposition, Some(content_type));
        self.buf.extend_from_slice(data);
        self
    }

    /// 添加普通文本字段
    pub fn add_text_field(&mut self, name: &str, value: &str) -> &mut Self {
        let disposition = format!("form-data; name=\"{}\"", escape_quotes(name));
        self.begin_part(&disposition, None);
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// 写入结尾 boundary，返回 (Content-Type, 请求体)
    pub fn finish(mut self) -> (String, Vec<u8>) {
        if !self.buf.is_empty() {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (self.content_type(), self.buf)
    }
}

impl Default for FormBody {
    fn default() -> Self {
        Self::new()
    }
}
