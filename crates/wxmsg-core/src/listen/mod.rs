//! 消息接收模块
//!
//! - WebSocket 客户端 (`ws://<addr>/ws`)
//! - HTTP 回调服务器 (`POST /callback`)

pub mod callback;
pub mod ws;

pub use callback::{BoundCallbackServer, CallbackServer};
pub use ws::WsListener;
