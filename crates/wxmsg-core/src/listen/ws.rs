//! WebSocket 消息监听
//!
//! 连接 `ws://<addr>/ws`，逐帧打印收到的消息，直到连接关闭。不重连。

use futures_util::{Stream, StreamExt};
use log::{info, warn};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message as WsFrame};

use crate::error::Result;
use crate::message::Message;

/// 处理帧流，返回处理的消息数
///
/// 文本帧和二进制帧都按 JSON 消息尽力解析；无法解析的帧记录为零值消息，循环继续。
/// 对端关闭或读取出错时结束。
pub async fn pump<S, F>(mut frames: S, mut on_message: F) -> usize
where
    S: Stream<Item = std::result::Result<WsFrame, tungstenite::Error>> + Unpin,
    F: FnMut(Message),
{
    let mut handled = 0;

    while let Some(frame) = frames.next().await {
        let data = match frame {
            Ok(WsFrame::Text(text)) => text.into_bytes(),
            Ok(WsFrame::Binary(data)) => data,
            Ok(WsFrame::Close(_)) => {
                info!("Connection closed by peer");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!("read: {}", e);
                break;
            }
        };

        info!("recv: {}", String::from_utf8_lossy(&data));
        let msg = Message::from_frame(&data);
        info!("msg: {:?}", msg);

        on_message(msg);
        handled += 1;
    }

    handled
}

/// WebSocket 监听客户端
pub struct WsListener {
    url: String,
}

impl WsListener {
    pub fn new(addr: &str) -> Self {
        Self {
            url: format!("ws://{}/ws", addr.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 连接并打印消息，直到连接结束
    pub async fn run(&self) -> Result<usize> {
        self.run_with(|_| {}).await
    }

    /// 连接并把每条消息交给回调
    pub async fn run_with<F: FnMut(Message)>(&self, on_message: F) -> Result<usize> {
        info!("connecting to {}", self.url);
        let (ws_stream, _) = connect_async(self.url.as_str()).await?;

        Ok(pump(ws_stream, on_message).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn test_url() {
        assert_eq!(WsListener::new("localhost:8080").url(), "ws://localhost:8080/ws");
        assert_eq!(WsListener::new("10.0.0.1:80/").url(), "ws://10.0.0.1:80/ws");
    }

    #[tokio::test]
    async fn test_pump_skips_malformed_frames() {
        let frames = stream::iter(vec![
            Ok(WsFrame::Text(r#"{"wxid":"a","type":1}"#.to_string())),
            Ok(WsFrame::Text("garbage".to_string())),
            Ok(WsFrame::Ping(vec![1, 2])),
            Ok(WsFrame::Binary(br#"{"wxid":"b"}"#.to_vec())),
            Ok(WsFrame::Close(None)),
            Ok(WsFrame::Text(r#"{"wxid":"after-close"}"#.to_string())),
        ]);

        let mut received = Vec::new();
        let handled = pump(frames, |msg| received.push(msg)).await;

        assert_eq!(handled, 3);
        assert_eq!(received[0].wxid, "a");
        assert_eq!(received[0].msg_type, 1);
        assert_eq!(received[1], Message::default());
        assert_eq!(received[2].wxid, "b");
    }

    #[tokio::test]
    async fn test_pump_stops_on_read_error() {
        let frames = stream::iter(vec![
            Ok(WsFrame::Text(r#"{"content":"one"}"#.to_string())),
            Err(tungstenite::Error::ConnectionClosed),
            Ok(WsFrame::Text(r#"{"content":"two"}"#.to_string())),
        ]);

        let mut received = Vec::new();
        let handled = pump(frames, |msg| received.push(msg.content)).await;

        assert_eq!(handled, 1);
        assert_eq!(received, vec!["one".to_string()]);
    }
}
