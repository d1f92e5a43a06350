//! In-place edits an authorized editor applies to the content record.
//!
//! Every edit is a pure transform: `apply_edit` never mutates its input and
//! either returns the whole updated record or an error leaving nothing changed.
//! Milestones are addressed by their stable id, not by position.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::defaults::new_milestone;
use super::model::{ALBUM_SLOT_COUNT, ContentRecord, EventInfo, MilestoneIcon, parse_event_date};
use crate::error::{CoreError, CoreResult};

/// Top-level media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaField {
    HeroImage,
    MusicUrl,
    QrGroom,
    QrBride,
}

/// Scalar field of `details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailField {
    GroomName,
    BrideName,
    EventDate,
    InvitationText,
    Initials,
    InvitationQuote,
}

/// Which ceremony an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ceremony {
    #[serde(rename = "vuQuy")]
    VuQuy,
    #[serde(rename = "thanhHon")]
    ThanhHon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Title,
    Date,
    Time,
    Location,
    Address,
    MapLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneField {
    Date,
    Title,
    Desc,
    Img,
    /// An empty value clears the icon.
    Icon,
}

/// One editor mutation, as posted by the edit-mode page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ContentEdit {
    SetMedia {
        field: MediaField,
        value: String,
    },
    SetAlbumPhoto {
        slot: usize,
        url: String,
    },
    SetDetail {
        field: DetailField,
        value: String,
    },
    SetEventField {
        event: Ceremony,
        field: EventField,
        value: String,
    },
    SetMilestoneField {
        id: Uuid,
        field: MilestoneField,
        value: String,
    },
    AddMilestone,
    RemoveMilestone {
        id: Uuid,
    },
}

/// ## Summary
/// Applies one edit to `current` and returns the updated record.
///
/// Removing the only remaining milestone is a no-op.
///
/// ## Errors
/// - `ValidationError` for an album slot outside the fixed slots, a malformed
///   event date, or an unknown icon key.
/// - `NotFound` when the addressed milestone does not exist.
pub fn apply_edit(current: &ContentRecord, edit: &ContentEdit) -> CoreResult<ContentRecord> {
    let mut next = current.clone();

    match edit {
        ContentEdit::SetMedia { field, value } => {
            let target = match field {
                MediaField::HeroImage => &mut next.hero_image,
                MediaField::MusicUrl => &mut next.music_url,
                MediaField::QrGroom => &mut next.qr_groom,
                MediaField::QrBride => &mut next.qr_bride,
            };
            value.clone_into(target);
        }
        ContentEdit::SetAlbumPhoto { slot, url } => {
            if *slot >= ALBUM_SLOT_COUNT {
                return Err(CoreError::ValidationError(format!(
                    "album slot {slot} out of range (0..{ALBUM_SLOT_COUNT})"
                )));
            }
            if next.album_urls.len() <= *slot {
                next.album_urls.resize(slot + 1, String::new());
            }
            url.clone_into(&mut next.album_urls[*slot]);
        }
        ContentEdit::SetDetail { field, value } => {
            let details = &mut next.details;
            let target = match field {
                DetailField::GroomName => &mut details.groom_name,
                DetailField::BrideName => &mut details.bride_name,
                DetailField::EventDate => {
                    parse_event_date(value)?;
                    &mut details.event_date
                }
                DetailField::InvitationText => &mut details.invitation_text,
                DetailField::Initials => &mut details.initials,
                DetailField::InvitationQuote => &mut details.invitation_quote,
            };
            value.clone_into(target);
        }
        ContentEdit::SetEventField {
            event,
            field,
            value,
        } => {
            let info = match event {
                Ceremony::VuQuy => &mut next.details.vu_quy,
                Ceremony::ThanhHon => &mut next.details.thanh_hon,
            };
            value.clone_into(event_field_mut(info, *field));
        }
        ContentEdit::SetMilestoneField { id, field, value } => {
            let milestone = next
                .details
                .milestones
                .iter_mut()
                .find(|m| m.id == *id)
                .ok_or_else(|| CoreError::NotFound(format!("milestone {id}")))?;
            match field {
                MilestoneField::Date => value.clone_into(&mut milestone.date),
                MilestoneField::Title => value.clone_into(&mut milestone.title),
                MilestoneField::Desc => value.clone_into(&mut milestone.desc),
                MilestoneField::Img => value.clone_into(&mut milestone.img),
                MilestoneField::Icon if value.is_empty() => milestone.icon = None,
                MilestoneField::Icon => milestone.icon = Some(value.parse::<MilestoneIcon>()?),
            }
        }
        ContentEdit::AddMilestone => next.details.milestones.push(new_milestone()),
        ContentEdit::RemoveMilestone { id } => {
            let milestones = &mut next.details.milestones;
            let index = milestones
                .iter()
                .position(|m| m.id == *id)
                .ok_or_else(|| CoreError::NotFound(format!("milestone {id}")))?;
            if milestones.len() > 1 {
                milestones.remove(index);
            } else {
                tracing::debug!(milestone_id = %id, "Refusing to remove the last milestone");
            }
        }
    }

    Ok(next)
}

/// ## Summary
/// Applies a batch of edits in order. The batch is all-or-nothing.
///
/// ## Errors
/// Returns the first edit error; `current` is left untouched.
pub fn apply_edits(current: &ContentRecord, edits: &[ContentEdit]) -> CoreResult<ContentRecord> {
    edits
        .iter()
        .try_fold(current.clone(), |record, edit| apply_edit(&record, edit))
}

fn event_field_mut(info: &mut EventInfo, field: EventField) -> &mut String {
    match field {
        EventField::Title => &mut info.title,
        EventField::Date => &mut info.date,
        EventField::Time => &mut info.time,
        EventField::Location => &mut info.location,
        EventField::Address => &mut info.address,
        EventField::MapLink => &mut info.map_link,
    }
}
