use chrono::Utc;
use dotenv::dotenv;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tracing::{info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;
use truthlens::{Settings, TruthLens};
use uuid::Uuid;

mod api;
use api::message::{
    ErrorPayload, FactCheckRequestPayload, MediaCheckRequestPayload, Message, StatusPayload,
};

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn error_message(id: String, code: u16, detail: impl Into<String>) -> Message {
    Message::Error {
        id,
        ts: now(),
        payload: ErrorPayload {
            code,
            detail: detail.into(),
        },
    }
}

async fn respond(lens: &TruthLens, text: &str) -> Option<Message> {
    let parsed: Message = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "unparseable message");
            return Some(error_message("system".to_string(), 400, "JSON parse error"));
        }
    };

    match parsed {
        Message::FactCheckRequest {
            id,
            ts: _,
            payload: FactCheckRequestPayload { text },
        } => {
            let result = lens.fact_check.run_fact_check(&text).await;
            Some(Message::FactCheckResult {
                id,
                ts: now(),
                payload: result,
            })
        }
        Message::MediaCheckRequest {
            id,
            ts: _,
            payload:
                MediaCheckRequestPayload {
                    media_url,
                    media_type,
                },
        } => match lens.media.run_media_check(&media_url, &media_type).await {
            Ok(result) => Some(Message::MediaCheckResult {
                id,
                ts: now(),
                payload: result,
            }),
            Err(err) => Some(error_message(id, err.status_code(), err.to_string())),
        },
        Message::Health { id, ts: _ } => Some(Message::Status {
            id,
            ts: now(),
            payload: StatusPayload {
                status: "healthy".to_string(),
                model: lens.model.clone(),
                search: "brave".to_string(),
                media_detection: lens.media.is_enabled(),
            },
        }),
        // Server-to-client messages are ignored when echoed back.
        _ => None,
    }
}

async fn serve_connection(lens: Arc<TruthLens>, stream: TcpStream) -> anyhow::Result<()> {
    let mut ws = accept_async(stream).await?;

    while let Some(msg) = ws.next().await {
        let msg = msg?;
        if msg.is_close() {
            break;
        }
        if !msg.is_text() {
            continue;
        }

        let text = msg.to_text()?;
        if let Some(reply) = respond(&lens, text).await {
            ws.send(tokio_tungstenite::tungstenite::Message::Text(
                serde_json::to_string(&reply)?.into(),
            ))
            .await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let lens = Arc::new(TruthLens::from_settings(&settings)?);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "TRUTHLENS-BRG listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let lens = Arc::clone(&lens);
        let span = info_span!("connection", id = %Uuid::new_v4(), %peer);

        tokio::spawn(
            async move {
                info!("connected");
                if let Err(e) = serve_connection(lens, stream).await {
                    warn!(error = %e, "connection closed with error");
                } else {
                    info!("disconnected");
                }
            }
            .instrument(span),
        );
    }
}
