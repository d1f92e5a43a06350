//! Personalized invite links.
//!
//! A link is a pure function of the stored guest name:
//! `origin/?to=<name with whitespace runs as "_", form-urlencoded>`.

use url::Url;

use crate::error::{CoreError, CoreResult};

/// Trims a guest name and collapses inner whitespace runs to single spaces.
#[must_use]
pub fn normalize_guest_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ## Summary
/// Builds the invite link for `guest_name` under the public `origin`.
///
/// ## Errors
/// Returns a configuration error if `origin` is not an absolute URL.
pub fn invite_link(origin: &str, guest_name: &str) -> CoreResult<String> {
    let mut url = Url::parse(origin)
        .map_err(|e| CoreError::ConfigError(format!("invalid public origin '{origin}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CoreError::ConfigError(format!(
            "public origin '{origin}' cannot carry a path"
        )));
    }

    let token = guest_name.split_whitespace().collect::<Vec<_>>().join("_");
    url.set_path("/");
    url.set_fragment(None);
    url.query_pairs_mut().clear().append_pair("to", &token);

    Ok(url.into())
}
