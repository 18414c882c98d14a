//! WebSocket Handler

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::state::AppState;

/// 事件 WebSocket（状态快照、错误通知、播放指令）
pub async fn events_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_events_socket(socket, state))
}

fn encode(event: &WsEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize event");
            None
        }
    }
}

/// 等待任一方向结束，并中止另一方向
async fn first_of(mut forward: JoinHandle<()>, mut receive: JoinHandle<()>) {
    tokio::select! {
        _ = &mut forward => receive.abort(),
        _ = &mut receive => forward.abort(),
    }
}

async fn handle_events_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 先订阅再取快照，避免漏掉中间的状态变化
    let mut event_rx = state.event_publisher.subscribe();
    let initial = WsEvent::StateChanged {
        snapshot: state.orchestrator.snapshot(),
    };

    tracing::info!("Events WebSocket connected");

    let forward_task = tokio::spawn(async move {
        if let Some(msg) = encode(&initial) {
            if sender.send(msg).await.is_err() {
                return;
            }
        }

        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Events WebSocket lagging behind");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let Some(msg) = encode(&event) else {
                continue;
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    // 接收客户端消息（心跳）
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Events WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Events WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    first_of(forward_task, receive_task).await;

    tracing::info!("Events WebSocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_finished_direction_aborts_the_other() {
        let (alive_tx, alive_rx) = oneshot::channel::<()>();
        let pending = tokio::spawn(async move {
            let _alive = alive_tx;
            std::future::pending::<()>().await;
        });
        let finished = tokio::spawn(async {});

        first_of(finished, pending).await;

        // 被中止的任务释放了 sender
        let closed = tokio::time::timeout(Duration::from_secs(1), alive_rx)
            .await
            .expect("other direction still running");
        assert!(closed.is_err());
    }
}
