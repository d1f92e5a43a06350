//! Guest identity and edit capability from the page URL and the caller's session.

use chrono::{DateTime, Utc};

/// Query keys that may carry the guest name, highest priority first.
pub const GUEST_NAME_KEYS: [&str; 3] = ["to", "Ten", "name"];

/// Greeting used when the URL names no guest.
pub const FALLBACK_GUEST_NAME: &str = "Bạn";

/// Decoded query string. Repeated keys keep their first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw `application/x-www-form-urlencoded` query, with or without
    /// the leading `?`. Percent escapes and `+` are decoded exactly once.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn flag(&self, key: &str, expected: &str) -> bool {
        self.get(key) == Some(expected)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Authentication state of one browser session.
///
/// Holds no credential: only the fact that an admin login succeeded for this
/// session, and until when.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    admin: Option<AdminGrant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AdminGrant {
    username: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn admin(username: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            admin: Some(AdminGrant {
                username: username.into(),
                expires_at,
            }),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.admin
            .as_ref()
            .is_some_and(|grant| grant.expires_at > Utc::now())
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.admin.as_ref().map(|grant| grant.username.as_str())
    }
}

/// ## Summary
/// Display name of the guest a link was made for.
///
/// Takes the first non-empty value among [`GUEST_NAME_KEYS`] and turns
/// underscores back into spaces. Falls back to [`FALLBACK_GUEST_NAME`].
#[must_use]
pub fn extract_guest_name(query: &QueryParams) -> String {
    GUEST_NAME_KEYS
        .iter()
        .filter_map(|key| query.get(key))
        .find(|value| !value.is_empty())
        .map(|value| value.replace('_', " ").trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_GUEST_NAME.to_string())
}

/// `mode=edit` on an authenticated session.
#[must_use]
pub fn can_edit(session: &Session, query: &QueryParams) -> bool {
    session.is_authenticated() && query.flag("mode", "edit")
}

/// `dashboard=true` on an authenticated session.
#[must_use]
pub fn can_view_dashboard(session: &Session, query: &QueryParams) -> bool {
    session.is_authenticated() && query.flag("dashboard", "true")
}

/// Per-request view of the page: who is greeted and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GuestView {
    pub guest_name: String,
    pub can_edit: bool,
    pub show_dashboard: bool,
}

impl GuestView {
    #[must_use]
    pub fn new(session: &Session, query: &QueryParams) -> Self {
        Self {
            guest_name: extract_guest_name(query),
            can_edit: can_edit(session, query),
            show_dashboard: can_view_dashboard(session, query),
        }
    }
}
