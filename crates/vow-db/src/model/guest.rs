use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::enums::{GuestGroup, GuestStatus};
use crate::db::schema;

/// One row of `guests`: an invitation and, once answered, the guest's response.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::guests)]
#[diesel(check_for_backend(Pg))]
pub struct Guest {
    pub id: uuid::Uuid,
    pub wedding_id: Option<uuid::Uuid>,
    pub guest_name: String,
    pub guest_group: Option<GuestGroup>,
    pub attendance_status: Option<bool>,
    pub guest_count: Option<i32>,
    pub wish_message: Option<String>,
    pub invite_link: Option<String>,
    pub status: GuestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Guest {
    #[must_use]
    pub const fn has_responded(&self) -> bool {
        self.attendance_status.is_some()
    }

    /// The wish text, if it has any non-whitespace content.
    #[must_use]
    pub fn wish(&self) -> Option<&str> {
        self.wish_message
            .as_deref()
            .filter(|wish| !wish.trim().is_empty())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::guests)]
pub struct NewGuest {
    pub id: uuid::Uuid,
    pub wedding_id: Option<uuid::Uuid>,
    pub guest_name: String,
    pub guest_group: Option<GuestGroup>,
    pub attendance_status: Option<bool>,
    pub guest_count: Option<i32>,
    pub wish_message: Option<String>,
    pub invite_link: Option<String>,
    pub status: GuestStatus,
}

impl NewGuest {
    /// An unanswered invitation created from the admin console.
    #[must_use]
    pub fn invitation(
        wedding_id: Option<uuid::Uuid>,
        guest_name: String,
        guest_group: Option<GuestGroup>,
        invite_link: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            wedding_id,
            guest_name,
            guest_group,
            attendance_status: None,
            guest_count: Some(1),
            wish_message: None,
            invite_link: Some(invite_link),
            status: GuestStatus::Invited,
        }
    }

    /// A row written directly by the public RSVP form.
    #[must_use]
    pub fn response(wedding_id: uuid::Uuid, guest_name: String, response: &GuestResponse) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            wedding_id: Some(wedding_id),
            guest_name,
            guest_group: None,
            attendance_status: Some(response.attending),
            guest_count: Some(response.guest_count),
            wish_message: response.wish_message.clone(),
            invite_link: None,
            status: GuestStatus::for_attendance(response.attending),
        }
    }

    /// The row as it reads back after insert.
    #[must_use]
    pub fn into_guest(self, created_at: chrono::DateTime<chrono::Utc>) -> Guest {
        Guest {
            id: self.id,
            wedding_id: self.wedding_id,
            guest_name: self.guest_name,
            guest_group: self.guest_group,
            attendance_status: self.attendance_status,
            guest_count: self.guest_count,
            wish_message: self.wish_message,
            invite_link: self.invite_link,
            status: self.status,
            created_at,
        }
    }
}

/// An answered RSVP form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestResponse {
    pub attending: bool,
    pub guest_count: i32,
    pub wish_message: Option<String>,
}

/// Partial update of a guest row. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = schema::guests)]
pub struct GuestChangeset {
    pub guest_name: Option<String>,
    pub guest_group: Option<Option<GuestGroup>>,
    pub invite_link: Option<Option<String>>,
    pub attendance_status: Option<Option<bool>>,
    pub guest_count: Option<Option<i32>>,
    pub wish_message: Option<Option<String>>,
    pub status: Option<GuestStatus>,
}

impl GuestChangeset {
    /// Columns written when a guest answers.
    #[must_use]
    pub fn from_response(response: &GuestResponse) -> Self {
        Self {
            attendance_status: Some(Some(response.attending)),
            guest_count: Some(Some(response.guest_count)),
            wish_message: Some(response.wish_message.clone()),
            status: Some(GuestStatus::for_attendance(response.attending)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Writes the set columns onto an in-memory row.
    pub fn apply_to(&self, guest: &mut Guest) {
        if let Some(name) = &self.guest_name {
            guest.guest_name.clone_from(name);
        }
        if let Some(group) = self.guest_group {
            guest.guest_group = group;
        }
        if let Some(link) = &self.invite_link {
            guest.invite_link.clone_from(link);
        }
        if let Some(attendance) = self.attendance_status {
            guest.attendance_status = attendance;
        }
        if let Some(count) = self.guest_count {
            guest.guest_count = count;
        }
        if let Some(wish) = &self.wish_message {
            guest.wish_message.clone_from(wish);
        }
        if let Some(status) = self.status {
            guest.status = status;
        }
    }
}
