//! Client for the live event socket.
//!
//! One WebSocket per session. Frames are parsed at this boundary and
//! forwarded as typed `DataChange::Live` values. A closed or failed socket
//! produces a single `DataChange::ConnectionLost` and the task ends; the
//! server offers no resume, so reconnection is an explicit user action.

use std::sync::mpsc::Sender;

use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;

use crate::config::CoreConfig;
use crate::constants::SOCKET_PATH;
use crate::net::worker::DataChange;
use crate::session::Session;
use crate::streaming::types::parse_frame;

pub struct SocketClient {
    host: String,
    token: String,
    school: String,
}

impl SocketClient {
    pub fn new(config: &CoreConfig, session: &Session) -> Self {
        Self {
            host: config.host().to_string(),
            token: session.token.clone(),
            school: session.school.clone(),
        }
    }

    fn socket_url(&self) -> Result<reqwest::Url, String> {
        reqwest::Url::parse_with_params(
            &format!("ws://{}{}", self.host, SOCKET_PATH),
            &[("token", self.token.as_str()), ("school", self.school.as_str())],
        )
        .map_err(|e| e.to_string())
    }

    /// Read the socket until it closes, sending parsed events through
    /// `data_tx`. Always ends with `ConnectionLost` unless the receiver is
    /// already gone.
    pub async fn run(self, data_tx: Sender<DataChange>) {
        let url = match self.socket_url() {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "invalid socket URL");
                let _ = data_tx.send(DataChange::ConnectionLost);
                return;
            }
        };

        let (stream, _) = match connect_async(url.as_str()).await {
            Ok(connected) => connected,
            Err(e) => {
                tracing::warn!(error = %e, "live socket connect failed");
                let _ = data_tx.send(DataChange::ConnectionLost);
                return;
            }
        };
        tracing::info!("live socket connected");

        let (_write, mut read) = stream.split();
        while let Some(frame) = read.next().await {
            match frame {
                Ok(WsMessage::Text(text)) => {
                    if let Some(event) = parse_frame(&text) {
                        if data_tx.send(DataChange::Live(event)).is_err() {
                            // Receiver dropped: the session is over.
                            return;
                        }
                    }
                }
                Ok(WsMessage::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "live socket read error");
                    break;
                }
            }
        }

        tracing::warn!("live socket disconnected");
        let _ = data_tx.send(DataChange::ConnectionLost);
    }
}
