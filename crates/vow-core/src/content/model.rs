//! Strongly typed content record.
//!
//! Field names on the wire follow the stored `details` document (`vuQuy`,
//! `thanhHon`, `mapLink`, `desc`, `img`) so rows written by earlier clients load
//! unchanged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Number of photo slots in the album section.
pub const ALBUM_SLOT_COUNT: usize = 6;

/// `chrono` format of `Details::event_date` (`30 . 01 . 2026`).
pub const EVENT_DATE_FORMAT: &str = "%d . %m . %Y";

/// Namespace for ids of milestones stored before milestones had ids.
const MILESTONE_NAMESPACE: Uuid = Uuid::from_u128(0x8f1c_2d3e_4b5a_4c6d_9e7f_0a1b_2c3d_4e5f);

/// Complete, render-ready content of one wedding page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Row id; `None` when the record comes from the built-in defaults.
    pub id: Option<Uuid>,
    pub slug: String,
    pub hero_image: String,
    pub music_url: String,
    pub album_urls: Vec<String>,
    pub qr_groom: String,
    pub qr_bride: String,
    pub details: Details,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub groom_name: String,
    pub bride_name: String,
    pub event_date: String,
    pub invitation_text: String,
    pub initials: String,
    pub invitation_quote: String,
    pub milestones: Vec<Milestone>,
    #[serde(rename = "vuQuy")]
    pub vu_quy: EventInfo,
    #[serde(rename = "thanhHon")]
    pub thanh_hon: EventInfo,
}

/// One ceremony (time, place, map).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub address: String,
    #[serde(rename = "mapLink")]
    pub map_link: String,
}

/// One entry of the love-story timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Uuid,
    pub date: String,
    pub title: String,
    pub desc: String,
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MilestoneIcon>,
}

impl Milestone {
    /// Deterministic id for a stored milestone that has none, derived from its
    /// position so the same legacy list always yields the same ids.
    #[must_use]
    pub fn legacy_id(index: usize) -> Uuid {
        Uuid::new_v5(&MILESTONE_NAMESPACE, format!("milestone-{index}").as_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneIcon {
    Calendar,
    Heart,
    Star,
    Gift,
    Mappin,
    Music,
    Sparkles,
}

impl MilestoneIcon {
    pub const ALL: [Self; 7] = [
        Self::Calendar,
        Self::Heart,
        Self::Star,
        Self::Gift,
        Self::Mappin,
        Self::Music,
        Self::Sparkles,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Heart => "heart",
            Self::Star => "star",
            Self::Gift => "gift",
            Self::Mappin => "mappin",
            Self::Music => "music",
            Self::Sparkles => "sparkles",
        }
    }
}

impl std::str::FromStr for MilestoneIcon {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| CoreError::ValidationError(format!("unknown milestone icon '{s}'")))
    }
}

impl std::fmt::Display for MilestoneIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Parses an event date in the `DD . MM . YYYY` format.
///
/// ## Errors
/// Returns a validation error if the text does not match the format.
pub fn parse_event_date(text: &str) -> CoreResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(text.trim(), EVENT_DATE_FORMAT).map_err(|e| {
        CoreError::ValidationError(format!("event date '{text}' is not DD . MM . YYYY: {e}"))
    })
}

/// Content as stored remotely: any field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialContentRecord {
    pub id: Option<Uuid>,
    pub slug: Option<String>,
    pub hero_image: Option<String>,
    pub music_url: Option<String>,
    pub album_urls: Option<Vec<Option<String>>>,
    pub qr_groom: Option<String>,
    pub qr_bride: Option<String>,
    pub details: Option<PartialDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialDetails {
    pub groom_name: Option<String>,
    pub bride_name: Option<String>,
    pub event_date: Option<String>,
    pub invitation_text: Option<String>,
    pub initials: Option<String>,
    pub invitation_quote: Option<String>,
    pub milestones: Option<Vec<PartialMilestone>>,
    #[serde(rename = "vuQuy")]
    pub vu_quy: Option<PartialEventInfo>,
    #[serde(rename = "thanhHon")]
    pub thanh_hon: Option<PartialEventInfo>,
}

impl PartialDetails {
    /// ## Summary
    /// Reads a stored `details` document. `null` is an empty document.
    ///
    /// ## Errors
    /// Returns a validation error if the document is not shaped like `details`.
    pub fn from_json(value: serde_json::Value) -> CoreResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
            .map_err(|e| CoreError::ValidationError(format!("malformed details document: {e}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialEventInfo {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "mapLink")]
    pub map_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialMilestone {
    pub id: Option<Uuid>,
    pub date: Option<String>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub img: Option<String>,
    pub icon: Option<String>,
}

impl PartialMilestone {
    /// Fills missing fields with empty text. Unknown icon keys are dropped.
    #[must_use]
    pub fn into_milestone(self, index: usize) -> Milestone {
        Milestone {
            id: self.id.unwrap_or_else(|| Milestone::legacy_id(index)),
            date: self.date.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            desc: self.desc.unwrap_or_default(),
            img: self.img.unwrap_or_default(),
            icon: self.icon.and_then(|key| key.parse().ok()),
        }
    }
}
