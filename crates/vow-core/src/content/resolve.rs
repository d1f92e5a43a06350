//! Merges a partial stored record over the defaults.
//!
//! ## Merge policy
//! - media fields (`hero_image`, `music_url`, `qr_*`): stored value wins only when non-empty
//! - `album_urls`: stored list wins only when non-empty; null slots become empty placeholders
//! - `details` scalars: stored value wins when present (null falls back)
//! - `milestones`: all-or-nothing, stored list wins only when non-empty
//! - `vuQuy` / `thanhHon`: per-field merge, never wholesale replacement

use super::model::{
    ContentRecord, Details, EventInfo, PartialContentRecord, PartialDetails, PartialEventInfo,
    PartialMilestone,
};

/// ## Summary
/// Produces a complete content record from an optional stored record.
///
/// `None` (fetch failed, timed out or found no row) yields `defaults` verbatim.
#[must_use]
pub fn resolve(remote: Option<PartialContentRecord>, defaults: &ContentRecord) -> ContentRecord {
    let Some(remote) = remote else {
        return defaults.clone();
    };

    ContentRecord {
        id: remote.id.or(defaults.id),
        slug: resolve_media(remote.slug, &defaults.slug),
        hero_image: resolve_media(remote.hero_image, &defaults.hero_image),
        music_url: resolve_media(remote.music_url, &defaults.music_url),
        album_urls: merge_album(remote.album_urls, &defaults.album_urls),
        qr_groom: resolve_media(remote.qr_groom, &defaults.qr_groom),
        qr_bride: resolve_media(remote.qr_bride, &defaults.qr_bride),
        details: Details::merge(&defaults.details, remote.details.unwrap_or_default()),
    }
}

fn resolve_media(remote: Option<String>, default: &str) -> String {
    remote
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn pick_present(remote: Option<String>, default: &str) -> String {
    remote.unwrap_or_else(|| default.to_string())
}

fn merge_album(remote: Option<Vec<Option<String>>>, default: &[String]) -> Vec<String> {
    match remote {
        Some(slots) if !slots.is_empty() => {
            slots.into_iter().map(Option::unwrap_or_default).collect()
        }
        _ => default.to_vec(),
    }
}

fn merge_milestones(
    remote: Option<Vec<PartialMilestone>>,
    default: &[super::model::Milestone],
) -> Vec<super::model::Milestone> {
    match remote {
        Some(list) if !list.is_empty() => list
            .into_iter()
            .enumerate()
            .map(|(index, milestone)| milestone.into_milestone(index))
            .collect(),
        _ => default.to_vec(),
    }
}

impl Details {
    /// Shallow merge of stored `details` over `defaults`, with the per-field rules above.
    #[must_use]
    pub fn merge(defaults: &Self, remote: PartialDetails) -> Self {
        Self {
            groom_name: pick_present(remote.groom_name, &defaults.groom_name),
            bride_name: pick_present(remote.bride_name, &defaults.bride_name),
            event_date: pick_present(remote.event_date, &defaults.event_date),
            invitation_text: pick_present(remote.invitation_text, &defaults.invitation_text),
            initials: pick_present(remote.initials, &defaults.initials),
            invitation_quote: pick_present(remote.invitation_quote, &defaults.invitation_quote),
            milestones: merge_milestones(remote.milestones, &defaults.milestones),
            vu_quy: EventInfo::merge(&defaults.vu_quy, remote.vu_quy.unwrap_or_default()),
            thanh_hon: EventInfo::merge(&defaults.thanh_hon, remote.thanh_hon.unwrap_or_default()),
        }
    }
}

impl EventInfo {
    /// Per-field merge of a stored ceremony over the default one.
    #[must_use]
    pub fn merge(defaults: &Self, remote: PartialEventInfo) -> Self {
        Self {
            title: pick_present(remote.title, &defaults.title),
            date: pick_present(remote.date, &defaults.date),
            time: pick_present(remote.time, &defaults.time),
            location: pick_present(remote.location, &defaults.location),
            address: pick_present(remote.address, &defaults.address),
            map_link: pick_present(remote.map_link, &defaults.map_link),
        }
    }
}
