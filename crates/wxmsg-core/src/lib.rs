//! wxmsg Core Library
//!
//! 消息回调接口的演示/测试客户端
//!
//! # 模块
//!
//! - **send**: 以 multipart 表单或 JSON 发送图片/文件消息
//! - **listen**: WebSocket 消息监听和 HTTP 回调服务器
//! - **message**: 回调消息模型
//! - **config**: 运行模式和客户端配置
//!
//! # 使用示例
//!
//! ## 发送图片
//!
//! ```ignore
//! use wxmsg_core::{AttachmentKind, Encoding, MessageSender};
//!
//! let sender = MessageSender::new("localhost:8080")?;
//! let body = sender
//!     .send_attachment(Encoding::Form, AttachmentKind::Image, Path::new("1.jpg"), "wxid_xxx")
//!     .await?;
//! ```
//!
//! ## 接收回调
//!
//! ```ignore
//! use wxmsg_core::CallbackServer;
//!
//! let server = CallbackServer::new("0.0.0.0:8080");
//! let mut rx = server.subscribe();
//! tokio::spawn(server.run());
//! let msg = rx.recv().await?;
//! ```

pub mod config;
pub mod error;
pub mod listen;
pub mod message;
pub mod send;

pub use config::{ClientConfig, Mode};
pub use error::{ClientError, Result};
pub use listen::{BoundCallbackServer, CallbackServer, WsListener};
pub use message::Message;
pub use send::{AttachmentKind, Encoding, FilePayload, FormBody, ImagePayload, MessageSender};
