//! backend/src/io/rest/mappers/notification_mapper.rs

use serde_json::Value;
use tracing::debug;

use crate::domain::commands::notifications::{
    BroadcastCommand, BroadcastResult, MarkReadCommand, NotificationListResult,
};
use crate::domain::models::message::{
    BroadcastMessage as DomainBroadcastMessage, Notification as DomainNotification,
};
use shared::{
    BroadcastMessage as SharedBroadcastMessage, BroadcastRequest, BroadcastResponse,
    MarkReadRequest, Notification as SharedNotification, NotificationListResponse,
};

/// Mapper to convert between shared message DTOs and domain notification types.
pub struct NotificationMapper;

impl NotificationMapper {
    pub fn to_broadcast_command(request: BroadcastRequest) -> BroadcastCommand {
        BroadcastCommand {
            subject: request.subject,
            description: request.description,
            recipients: request.recipients,
            attachments: request.attachments,
        }
    }

    /// Keeps ids that are integers or integer strings; anything else is dropped.
    pub fn to_mark_read_command(request: MarkReadRequest) -> MarkReadCommand {
        let notification_ids = request
            .notification_ids
            .iter()
            .filter_map(|raw| {
                let parsed = parse_id(raw);
                if parsed.is_none() {
                    debug!("Ignoring malformed notification id: {}", raw);
                }
                parsed
            })
            .collect();

        MarkReadCommand { notification_ids }
    }

    pub fn to_message_dto(domain: DomainBroadcastMessage) -> SharedBroadcastMessage {
        SharedBroadcastMessage {
            id: domain.id,
            subject: domain.subject,
            description: domain.description,
            recipients: domain.recipients,
            attachments: domain.attachments,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_notification_dto(domain: DomainNotification) -> SharedNotification {
        SharedNotification {
            id: domain.id,
            activity_id: domain.activity_id,
            parent_email: domain.parent_email,
            is_read: domain.is_read,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_broadcast_response(result: BroadcastResult) -> BroadcastResponse {
        BroadcastResponse {
            message: Self::to_message_dto(result.message),
            notifications: result
                .notifications
                .into_iter()
                .map(Self::to_notification_dto)
                .collect(),
            recipients_requested: result.recipients_requested,
            notifications_created: result.notifications_created,
        }
    }

    pub fn to_list_response(result: NotificationListResult) -> NotificationListResponse {
        NotificationListResponse {
            notifications: result
                .notifications
                .into_iter()
                .map(Self::to_notification_dto)
                .collect(),
            unread_count: result.unread_count,
        }
    }
}

fn parse_id(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mark_read_drops_malformed_ids() {
        let request: MarkReadRequest = serde_json::from_value(json!({
            "notification_ids": [1, "2", " 3 ", "abc", null, 4.5, {"id": 5}, -7]
        }))
        .unwrap();

        let command = NotificationMapper::to_mark_read_command(request);
        assert_eq!(command.notification_ids, vec![1, 2, 3, -7]);
    }

    #[test]
    fn test_mark_read_missing_ids_is_empty() {
        let request: MarkReadRequest = serde_json::from_value(json!({})).unwrap();
        assert!(NotificationMapper::to_mark_read_command(request).notification_ids.is_empty());
    }
}
