//! 回调消息模型
//!
//! 服务端通过 WebSocket 帧或 `POST /callback` 推送的 JSON 消息。

use serde::{Deserialize, Serialize};

/// 回调消息
///
/// 缺失的字段取零值，与服务端的序列化行为保持一致。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// 发送者 wxid
    pub wxid: String,
    pub content: String,
    /// 接收者 wxid
    pub to_user: String,
    #[serde(rename = "msgid")]
    pub msg_id: u64,
    pub origin_msg: String,
    /// 群消息的来源群 wxid
    pub chat_room_source_wxid: String,
    pub msg_source: String,
    #[serde(rename = "type")]
    pub msg_type: u32,
    pub display_msg: String,
}

impl Message {
    /// 严格解析
    pub fn parse(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// 尽力解析 WebSocket 帧
    ///
    /// 无法解析时返回零值消息而不是错误。
    pub fn from_frame(data: &[u8]) -> Self {
        match Self::parse(data) {
            Ok(msg) => msg,
            Err(e) => {
                log::debug!("Ignoring undecodable frame: {}", e);
                Self::default()
            }
        }
    }
}
