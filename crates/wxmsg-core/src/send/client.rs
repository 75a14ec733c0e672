//! HTTP 发送客户端
//!
//! 读取本地文件，按选定的编码打包后 POST 到 `<addr>/sendimgmsg` 或
//! `<addr>/sendfilemsg`，返回服务端的原始响应体。
//!
//! 整个文件会先读入内存，不做分块上传。

use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use std::path::Path;

use crate::error::{ClientError, Result};
use crate::send::multipart::FormBody;
use crate::send::payload::{FilePayload, ImagePayload};
use crate::send::{AttachmentKind, Encoding, base_name};

/// 补全服务地址的协议头并去掉末尾的 `/`
pub fn service_url(addr: &str) -> String {
    let addr = addr.trim_end_matches('/');
    if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

/// 读取整个文件
pub async fn read_attachment(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}

/// 构造 multipart 请求体，返回 (Content-Type, 请求体)
pub async fn build_form(
    file_path: &Path,
    wxid: &str,
    field_name: &str,
    content_type: &str,
) -> Result<(String, Vec<u8>)> {
    let data = read_attachment(file_path).await?;

    let mut form = FormBody::new();
    form.add_file_part(field_name, &base_name(file_path), content_type, &data)
        .add_text_field("wxid", wxid);
    Ok(form.finish())
}

/// 构造 JSON 请求体，仅文件消息带 `filename`
pub async fn build_json(file_path: &Path, wxid: &str, kind: AttachmentKind) -> Result<Vec<u8>> {
    let data = read_attachment(file_path).await?;

    let body = match kind {
        AttachmentKind::Image => serde_json::to_vec(&ImagePayload {
            wxid: wxid.to_string(),
            image: data,
        })?,
        AttachmentKind::File => serde_json::to_vec(&FilePayload {
            wxid: wxid.to_string(),
            file: data,
            filename: base_name(file_path),
        })?,
    };
    Ok(body)
}

/// 消息发送客户端
pub struct MessageSender {
    http: reqwest::Client,
    base_url: String,
}

impl MessageSender {
    pub fn new(addr: &str) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: service_url(addr),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 以 multipart 表单发送
    pub async fn send_form(
        &self,
        file_path: &Path,
        wxid: &str,
        endpoint: &str,
        field_name: &str,
        content_type: &str,
    ) -> Result<Vec<u8>> {
        let (form_type, body) = build_form(file_path, wxid, field_name, content_type).await?;
        self.post(endpoint, &form_type, body).await
    }

    /// 以 JSON 发送
    pub async fn send_json(
        &self,
        file_path: &Path,
        wxid: &str,
        endpoint: &str,
        kind: AttachmentKind,
    ) -> Result<Vec<u8>> {
        let body = build_json(file_path, wxid, kind).await?;
        self.post(endpoint, "application/json", body).await
    }

    /// 按附件类型选择接口和字段后发送
    pub async fn send_attachment(
        &self,
        encoding: Encoding,
        kind: AttachmentKind,
        file_path: &Path,
        wxid: &str,
    ) -> Result<Vec<u8>> {
        info!(
            "Sending {:?} {:?} message to {}: {:?}",
            encoding, kind, wxid, file_path
        );
        match encoding {
            Encoding::Form => {
                self.send_form(
                    file_path,
                    wxid,
                    kind.endpoint(),
                    kind.field_name(),
                    kind.content_type(),
                )
                .await
            }
            Encoding::Json => {
                self.send_json(file_path, wxid, kind.endpoint(), kind)
                    .await
            }
        }
    }

    async fn post(&self, endpoint: &str, content_type: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {} ({} bytes, {})", url, body.len(), content_type);

        // reqwest 根据 Vec 的长度设置 Content-Length
        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!("{} responded with {}", url, status);
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
