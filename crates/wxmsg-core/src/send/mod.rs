//! 消息发送模块
//!
//! 包含:
//! - multipart 表单编码
//! - JSON 编码（文件内容为 base64）
//! - HTTP 发送客户端

pub mod client;
pub mod multipart;
pub mod payload;

pub use client::MessageSender;
pub use multipart::FormBody;
pub use payload::{FilePayload, ImagePayload};

use std::path::Path;

/// 请求体编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `multipart/form-data`
    Form,
    /// `application/json`
    Json,
}

/// 附件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    File,
}

impl AttachmentKind {
    /// 服务端接口路径
    pub fn endpoint(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "/sendimgmsg",
            AttachmentKind::File => "/sendfilemsg",
        }
    }

    /// 表单中的文件字段名，同时也是 JSON 中文件内容的键名
    pub fn field_name(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::File => "file",
        }
    }

    /// 表单文件部分的 Content-Type
    pub fn content_type(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "image/jpg",
            AttachmentKind::File => "text/plain",
        }
    }
}

/// 路径的最后一段；没有时返回路径本身
///
/// 非 UTF-8 的字节会被替换为 U+FFFD，此时发出的文件名与磁盘上的不同。
pub fn base_name(path: &Path) -> String {
    let name = path.file_name().unwrap_or(path.as_os_str());
    let lossy = name.to_string_lossy();
    if name.to_str().is_none() {
        log::debug!("File name {:?} is not valid UTF-8, sending {:?}", name, lossy);
    }
    lossy.into_owned()
}
