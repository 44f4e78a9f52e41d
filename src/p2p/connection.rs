use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{WebSocketStream, accept_async, client_async};

use super::error::PeerError;
use super::{Message, Node};

/// Accept inbound peers forever.
pub async fn serve(node: Arc<Node>, listener: TcpListener) {
    if let Ok(addr) = listener.local_addr() {
        info!("listening for peers on ws://{addr}");
    }
    loop {
        let (stream, remote) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("failed to accept peer: {e}");
                continue;
            }
        };
        let node = node.clone();
        tokio::spawn(async move {
            match accept_async(stream).await {
                Ok(ws) => run_connection(node, ws, remote).await,
                Err(e) => warn!("websocket handshake with {remote} failed: {e}"),
            }
        });
    }
}

/// Dial `peer` (`ws://host:port` or `host:port`) and start its session.
pub async fn connect(node: Arc<Node>, peer: &str) -> Result<SocketAddr, PeerError> {
    let (authority, url) = parse_peer(peer)?;
    let stream = TcpStream::connect(authority).await?;
    let remote = stream.peer_addr()?;
    let (ws, _response) = client_async(url, stream).await?;
    info!("connected to peer {peer} ({remote})");
    tokio::spawn(run_connection(node, ws, remote));
    Ok(remote)
}

/// Fire-and-forget [`connect`]; failures are only logged.
pub fn spawn_connect(node: Arc<Node>, peer: String) {
    tokio::spawn(async move {
        if let Err(e) = connect(node, &peer).await {
            error!("connection to peer {peer} failed: {e}");
        }
    });
}

/// Split a peer string into the TCP authority and the websocket URL.
pub fn parse_peer(peer: &str) -> Result<(&str, String), PeerError> {
    let peer = peer.trim();
    let rest = match peer.split_once("://") {
        Some(("ws", rest)) => rest,
        Some(_) => return Err(PeerError::InvalidAddress(peer.to_string())),
        None => peer,
    };
    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() || !authority.contains(':') {
        return Err(PeerError::InvalidAddress(peer.to_string()));
    }
    Ok((authority, format!("ws://{rest}")))
}

async fn run_connection<S>(node: Arc<Node>, ws: WebSocketStream<S>, remote: SocketAddr)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (sink, mut stream) = ws.split();
    let (outbound, queue) = unbounded_channel();
    let id = node.connect_peer(remote.to_string(), outbound);
    let mut writer = tokio::spawn(write_loop(sink, queue));

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => node.handle_frame(id, text.as_str()),
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("peer {id} ({remote}) read error: {e}");
                    break;
                }
            },
            _ = &mut writer => {
                debug!("peer {id} writer stopped");
                break;
            }
        }
    }

    node.disconnect_peer(id);
    writer.abort();
}

async fn write_loop<S>(
    mut sink: SplitSink<WebSocketStream<S>, WsMessage>,
    mut queue: UnboundedReceiver<Message>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(message) = queue.recv().await {
        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => {
                error!("failed to encode outbound message: {e}");
                continue;
            }
        };
        if let Err(e) = sink.send(WsMessage::text(text)).await {
            warn!("peer write failed: {e}");
            break;
        }
    }
}
