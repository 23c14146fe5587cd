//! 通知出口
//!
//! fire-and-forget：通知失败只记录日志，绝不向生命周期操作的调用方
//! 传播。推送/邮件等真实发送端在本服务之外。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// 通知事件类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotifyEvent {
    SubmissionReceived,
    SubmissionGraded,
    FeedbackAdded,
    HomeworkAssigned,
}

impl std::fmt::Display for NotifyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyEvent::SubmissionReceived => write!(f, "submission_received"),
            NotifyEvent::SubmissionGraded => write!(f, "submission_graded"),
            NotifyEvent::FeedbackAdded => write!(f, "feedback_added"),
            NotifyEvent::HomeworkAssigned => write!(f, "homework_assigned"),
        }
    }
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// 发送通知，返回是否成功
    async fn notify(&self, user_id: i64, event: NotifyEvent, payload: serde_json::Value) -> bool;
}

/// 仅写日志的通知实现
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, user_id: i64, event: NotifyEvent, payload: serde_json::Value) -> bool {
        info!(
            "Notification for user {}: {} payload={}",
            user_id, event, payload
        );
        true
    }
}

/// 异步派发通知，失败只记日志
pub fn dispatch(
    sink: &Arc<dyn NotificationSink>,
    user_id: i64,
    event: NotifyEvent,
    payload: serde_json::Value,
) {
    let sink = sink.clone();
    tokio::spawn(async move {
        if !sink.notify(user_id, event, payload).await {
            warn!("Notification delivery failed for user {}: {}", user_id, event);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracing_sink_always_succeeds() {
        let sink = TracingNotificationSink;
        assert!(
            sink.notify(1, NotifyEvent::SubmissionGraded, serde_json::json!({"grade": 90}))
                .await
        );
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(NotifyEvent::SubmissionReceived.to_string(), "submission_received");
        assert_eq!(NotifyEvent::HomeworkAssigned.to_string(), "homework_assigned");
    }
}
