//! wxmsg CLI
//!
//! 消息回调接口的演示客户端：监听 WebSocket 消息、运行回调服务器，
//! 或以 multipart/JSON 发送图片和文件消息。
//!
//! 日志输出到 stderr，stdout 只输出服务端的响应体：
//!
//! ```bash
//! RUST_LOG=debug wxmsg --mode form-img --img ./1.jpg --wxid wxid_xxx
//! ```

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wxmsg_core::{
    AttachmentKind, CallbackServer, ClientConfig, ClientError, Encoding, MessageSender, Mode,
    WsListener,
};

#[derive(Parser, Debug)]
#[command(name = "wxmsg", version, about = "消息回调接口演示客户端")]
struct Cli {
    /// 服务地址 (默认: localhost:8080)
    #[arg(long)]
    addr: Option<String>,
    /// 启动模式: ws, http, form-img, json-img, form-file, json-file (默认: json-file)
    #[arg(long)]
    mode: Option<String>,
    /// 发送图片消息时的图片路径
    #[arg(long = "img")]
    image: Option<PathBuf>,
    /// 发送文件消息时的文件路径
    #[arg(long)]
    file: Option<PathBuf>,
    /// 消息接收者的 wxid
    #[arg(long)]
    wxid: Option<String>,
    /// 配置文件 (默认: <config_dir>/wxmsg/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// 用命令行参数覆盖配置文件中的值
    fn resolve(self, mut config: ClientConfig) -> Result<ClientConfig, ClientError> {
        if let Some(mode) = self.mode {
            config.mode = mode.parse()?;
        }
        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(image) = self.image {
            config.image_path = image;
        }
        if let Some(file) = self.file {
            config.file_path = file;
        }
        if let Some(wxid) = self.wxid {
            config.wxid = wxid;
        }
        Ok(config)
    }
}

/// 启动模式对应的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Send(Encoding, AttachmentKind),
    ListenWs,
    ServeCallback,
}

impl Action {
    fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Ws => Action::ListenWs,
            Mode::Http => Action::ServeCallback,
            Mode::FormImg => Action::Send(Encoding::Form, AttachmentKind::Image),
            Mode::JsonImg => Action::Send(Encoding::Json, AttachmentKind::Image),
            Mode::FormFile => Action::Send(Encoding::Form, AttachmentKind::File),
            Mode::JsonFile => Action::Send(Encoding::Json, AttachmentKind::File),
        }
    }
}

/// 合并配置并选出要执行的操作；模式无法识别时返回 `None`，不做任何操作
fn prepare(cli: Cli, base: ClientConfig) -> Option<(ClientConfig, Action)> {
    match cli.resolve(base) {
        Ok(config) => {
            let action = Action::for_mode(config.mode);
            Some((config, action))
        }
        Err(e) => {
            tracing::warn!("{}, nothing to do", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    };

    let Some((config, action)) = prepare(cli, base) else {
        return Ok(());
    };

    run(&config, action).await
}

/// 桥接 log crate（wxmsg-core 使用）到 tracing，输出到 stderr
fn init_logging() {
    let _ = tracing_log::LogTracer::init();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(config: &ClientConfig, action: Action) -> Result<()> {
    match action {
        Action::Send(encoding, kind) => send(config, encoding, kind).await?,
        Action::ListenWs => {
            let handled = WsListener::new(&config.addr).run().await?;
            tracing::info!("Connection ended after {} messages", handled);
        }
        Action::ServeCallback => CallbackServer::new(&config.addr).run().await?,
    }

    Ok(())
}

async fn send(config: &ClientConfig, encoding: Encoding, kind: AttachmentKind) -> Result<()> {
    let sender = MessageSender::new(&config.addr)?;
    let body = sender
        .send_attachment(encoding, kind, config.attachment_path(kind), &config.wxid)
        .await?;

    tracing::info!("{} send msg response ({} bytes)", config.mode, body.len());

    let mut stdout = io::stdout().lock();
    stdout.write_all(&body)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
