//! WebSocket を使った Transport 実装
//!
//! ## 責務
//!
//! - `tokio-tungstenite` によるハンドシェイク
//! - テキストフレームの送受信（バイナリフレームは UTF-8 テキストとして扱う）

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::error::ClientError;

use super::Transport;

/// WebSocket を使った Transport 実装
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// `url` に接続し、ハンドシェイク完了後の Transport を返す
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, response) = connect_async(url)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        tracing::debug!(
            "WebSocket handshake with {} completed ({})",
            url,
            response.status()
        );

        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, text: String) -> Result<(), ClientError> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, ClientError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_owned())),
                // バイナリフレームも JSON として解釈する（テキストでなければ不正なメッセージ）
                Ok(Message::Binary(data)) => return Some(binary_to_text(&data)),
                Ok(Message::Close(frame)) => {
                    tracing::info!("Server closed the connection: {:?}", frame);
                    return None;
                }
                // ping/pong は tungstenite が処理する
                Ok(_) => {}
                Err(e) => return Some(Err(ClientError::ConnectionError(e.to_string()))),
            }
        }
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))
    }
}

/// バイナリフレームを UTF-8 テキストに変換する
fn binary_to_text(data: &[u8]) -> Result<String, ClientError> {
    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|e| {
            ClientError::MalformedMessage(format!("binary frame of {} bytes: {}", data.len(), e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    /// 1 接続だけ受け付け、`frames` を順に送信してから閉じるサーバー
    async fn serve_frames(frames: Vec<Message>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            for frame in frames {
                ws.send(frame).await.unwrap();
            }
            let _ = ws.close(None).await;
        });

        url
    }

    #[test]
    fn test_binary_to_text_accepts_utf8() {
        // テスト項目: UTF-8 のバイナリデータはテキストに変換される
        // given (前提条件):
        let data = br#"{"type":"surprise"}"#;

        // when (操作):
        let result = binary_to_text(data);

        // then (期待する結果):
        assert_eq!(result.unwrap(), r#"{"type":"surprise"}"#);
    }

    #[test]
    fn test_binary_to_text_rejects_invalid_utf8() {
        // テスト項目: UTF-8 として不正なバイナリデータは MalformedMessage になる
        // given (前提条件):
        let data = [0xff, 0xfe, 0x00];

        // when (操作):
        let result = binary_to_text(&data);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::MalformedMessage(_))));
    }

    #[tokio::test]
    async fn test_recv_delivers_text_and_binary_frames() {
        // テスト項目: テキストフレームとバイナリフレームがどちらも読み捨てられずに届き、最後に None になる
        // given (前提条件):
        let url = serve_frames(vec![
            Message::Text("first".to_string().into()),
            Message::Binary(br#"{"type":"surprise","data":{}}"#.to_vec().into()),
            Message::Binary(vec![0xff, 0xfe].into()),
        ])
        .await;
        let mut transport = WebSocketTransport::connect(&url).await.unwrap();

        // when (操作):
        let first = transport.recv().await;
        let second = transport.recv().await;
        let third = transport.recv().await;
        let end = transport.recv().await;

        // then (期待する結果):
        assert_eq!(first.unwrap().unwrap(), "first");
        assert_eq!(
            second.unwrap().unwrap(),
            r#"{"type":"surprise","data":{}}"#
        );
        assert!(matches!(third, Some(Err(ClientError::MalformedMessage(_)))));
        assert!(end.is_none());
    }
}
