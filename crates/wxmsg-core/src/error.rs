//! 错误类型

use std::path::PathBuf;

use tokio_tungstenite::tungstenite;

/// 客户端错误
///
/// 发送模式下所有错误都会终止本次调用；监听模式下只有反序列化错误会被记录并跳过。
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("read file {path:?} failed: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("bind {addr} failed: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("unknown mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
