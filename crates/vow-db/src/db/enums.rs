//! Text-backed column enums.
//!
//! Each enum implements `ToSql` and `FromSql` against the CHECK constraints in
//! the initial migration.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// Guest category chosen by the admin.
///
/// Maps to `guests.guest_group`, stored as the Vietnamese label shown in the
/// admin console. The JSON form is the snake-case key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum GuestGroup {
    Friends,
    Colleagues,
    PaternalRelatives,
    MaternalRelatives,
    Vip,
}

impl GuestGroup {
    pub const ALL: [Self; 5] = [
        Self::Friends,
        Self::Colleagues,
        Self::PaternalRelatives,
        Self::MaternalRelatives,
        Self::Vip,
    ];

    /// Returns the database string representation of this group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Friends => "Bạn bè",
            Self::Colleagues => "Đồng nghiệp",
            Self::PaternalRelatives => "Họ hàng nội",
            Self::MaternalRelatives => "Họ hàng ngoại",
            Self::Vip => "Khách quý",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.as_str() == label)
    }
}

impl ToSql<Text, Pg> for GuestGroup {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for GuestGroup {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        std::str::from_utf8(bytes.as_bytes())
            .ok()
            .and_then(Self::from_label)
            .ok_or_else(|| "Unrecognized enum variant".into())
    }
}

impl fmt::Display for GuestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle tag of a guest row.
///
/// Maps to `guests.status` CHECK constraint. Whether a guest has responded is
/// read from `attendance_status`, not from this tag.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    #[default]
    Invited,
    Confirmed,
    Declined,
}

impl ToSql<Text, Pg> for GuestStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for GuestStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"invited" => Ok(Self::Invited),
            b"confirmed" => Ok(Self::Confirmed),
            b"declined" => Ok(Self::Declined),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl GuestStatus {
    /// Returns the database string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }

    /// Status after a guest answers the RSVP form.
    #[must_use]
    pub const fn for_attendance(attending: bool) -> Self {
        if attending {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
