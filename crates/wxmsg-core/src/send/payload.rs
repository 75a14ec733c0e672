//! JSON 发送载荷
//!
//! 文件内容以标准 base64（带填充）编码为字符串字段。

use serde::{Deserialize, Serialize};

/// 图片消息: `{"wxid": "...", "image": "<base64>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub wxid: String,
    #[serde(with = "base64_bytes")]
    pub image: Vec<u8>,
}

/// 文件消息: `{"wxid": "...", "file": "<base64>", "filename": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub wxid: String,
    #[serde(with = "base64_bytes")]
    pub file: Vec<u8>,
    pub filename: String,
}

mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
