//! backend/src/io/rest/mappers/announcement_mapper.rs

use crate::domain::commands::announcements::{
    AnnouncementReadStatus, CreateAnnouncementCommand, SweepResult,
};
use crate::domain::models::announcement::{Announcement as DomainAnnouncement, ViewerIdentity};
use shared::{
    Announcement as SharedAnnouncement, AnnouncementListResponse, AnnouncementWithReadStatus,
    CreateAnnouncementRequest, SweepResponse, ViewerQuery,
};

/// Mapper to convert between shared announcement DTOs and domain types.
pub struct AnnouncementMapper;

impl AnnouncementMapper {
    pub fn to_create_command(request: CreateAnnouncementRequest) -> CreateAnnouncementCommand {
        CreateAnnouncementCommand {
            title: request.title,
            content: request.content,
            announcement_type: request.announcement_type,
            visibility_days: request.visibility_days,
        }
    }

    pub fn to_identity(query: ViewerQuery) -> ViewerIdentity {
        ViewerIdentity::new(query.user_id, query.user_email)
    }

    pub fn to_dto(domain: DomainAnnouncement) -> SharedAnnouncement {
        SharedAnnouncement {
            id: domain.id,
            title: domain.title,
            content: domain.content,
            announcement_type: domain.announcement_type,
            is_active: domain.is_active,
            visibility_days: domain.visibility_days,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(statuses: Vec<AnnouncementReadStatus>) -> AnnouncementListResponse {
        let unread_count = statuses.iter().filter(|s| !s.is_read).count();
        AnnouncementListResponse {
            announcements: statuses
                .into_iter()
                .map(|s| AnnouncementWithReadStatus {
                    announcement: Self::to_dto(s.announcement),
                    is_read: s.is_read,
                })
                .collect(),
            unread_count,
        }
    }

    pub fn to_sweep_response(result: SweepResult) -> SweepResponse {
        SweepResponse {
            expired_ids: result.expired_ids,
            deleted_count: result.deleted_count,
        }
    }
}
