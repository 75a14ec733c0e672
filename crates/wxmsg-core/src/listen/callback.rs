//! HTTP 回调服务器
//!
//! 暴露 `POST /callback`，把请求体解析为 [`Message`] 并打印。
//!
//! 不检查请求的 Content-Type，只要请求体是合法 JSON 就接受。

use axum::{Router, body::Bytes, extract::State, http::StatusCode, routing::post};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::error::{ClientError, Result};
use crate::message::Message;

struct CallbackState {
    events: broadcast::Sender<Message>,
}

/// 回调服务器
pub struct CallbackServer {
    addr: String,
    state: Arc<CallbackState>,
}

impl CallbackServer {
    pub fn new(addr: &str) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            addr: addr.to_string(),
            state: Arc::new(CallbackState { events }),
        }
    }

    /// 订阅收到的消息
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.state.events.subscribe()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/callback", post(handle_callback))
            .with_state(self.state.clone())
    }

    /// 绑定监听地址
    pub async fn bind(self) -> Result<BoundCallbackServer> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| ClientError::Bind {
                addr: self.addr.clone(),
                source,
            })?;
        let app = self.router();
        Ok(BoundCallbackServer { listener, app })
    }

    /// 绑定并运行，直到进程退出
    pub async fn run(self) -> Result<()> {
        self.bind().await?.serve().await
    }
}

/// 已绑定端口的回调服务器
pub struct BoundCallbackServer {
    listener: TcpListener,
    app: Router,
}

impl BoundCallbackServer {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn serve(self) -> Result<()> {
        if let Ok(addr) = self.listener.local_addr() {
            info!("Callback server listening on {}", addr);
        }
        axum::serve(self.listener, self.app)
            .await
            .map_err(ClientError::Serve)
    }
}

async fn handle_callback(State(state): State<Arc<CallbackState>>, body: Bytes) -> StatusCode {
    match Message::parse(&body) {
        Ok(msg) => {
            info!("msg: {:?}", msg);
            // 没有订阅者时发送失败，忽略
            let _ = state.events.send(msg);
            StatusCode::OK
        }
        Err(e) => {
            warn!("bind json failed: {}", e);
            StatusCode::BAD_REQUEST
        }
    }
}
