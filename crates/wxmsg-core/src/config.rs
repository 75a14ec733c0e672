//! 客户端配置
//!
//! 运行模式、服务地址和待发送文件等设置。配置文件可选，命令行参数优先。

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ClientError;
use crate::send::{AttachmentKind, Encoding};

pub const DEFAULT_ADDR: &str = "localhost:8080";
pub const DEFAULT_IMAGE_PATH: &str = "../1.jpg";
pub const DEFAULT_FILE_PATH: &str = "../1.txt";
pub const DEFAULT_WXID: &str = "47331170911@chatroom";

/// 启动模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// 连接 `ws://<addr>/ws` 并打印收到的消息
    Ws,
    /// 启动 `POST /callback` 回调服务器
    Http,
    FormImg,
    JsonImg,
    FormFile,
    #[default]
    JsonFile,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Ws,
        Mode::Http,
        Mode::FormImg,
        Mode::JsonImg,
        Mode::FormFile,
        Mode::JsonFile,
    ];

    /// 命令行中的写法
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Ws => "ws",
            Mode::Http => "http",
            Mode::FormImg => "form-img",
            Mode::JsonImg => "json-img",
            Mode::FormFile => "form-file",
            Mode::JsonFile => "json-file",
        }
    }

    /// 发送模式对应的编码和附件类型，监听模式返回 `None`
    pub fn send_kind(&self) -> Option<(Encoding, AttachmentKind)> {
        match self {
            Mode::Ws | Mode::Http => None,
            Mode::FormImg => Some((Encoding::Form, AttachmentKind::Image)),
            Mode::JsonImg => Some((Encoding::Json, AttachmentKind::Image)),
            Mode::FormFile => Some((Encoding::Form, AttachmentKind::File)),
            Mode::JsonFile => Some((Encoding::Json, AttachmentKind::File)),
        }
    }
}

impl FromStr for Mode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ClientError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 客户端配置
///
/// 显式传入每个操作，不依赖进程级的全局参数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 服务地址 (`host:port`)
    pub addr: String,
    pub mode: Mode,
    /// 发送图片消息时的图片路径
    pub image_path: PathBuf,
    /// 发送文件消息时的文件路径
    pub file_path: PathBuf,
    /// 消息接收者
    pub wxid: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            mode: Mode::default(),
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            wxid: DEFAULT_WXID.to_string(),
        }
    }
}

impl ClientConfig {
    /// 默认配置文件路径
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wxmsg")
            .join("config.toml")
    }

    /// 从默认位置加载（文件不存在则使用默认值）
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// 从指定文件加载，读取或解析失败时回退到默认值
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// 当前模式要发送的文件
    pub fn attachment_path(&self, kind: AttachmentKind) -> &Path {
        match kind {
            AttachmentKind::Image => &self.image_path,
            AttachmentKind::File => &self.file_path,
        }
    }
}
