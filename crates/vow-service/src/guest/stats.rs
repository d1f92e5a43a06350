use serde::Serialize;
use vow_db::model::Guest;

/// Dashboard counters derived from the guest list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuestStats {
    /// Every row counts as invited, whatever its status.
    pub invited: usize,
    pub responded: usize,
    /// Sum of party sizes of confirmed guests; a missing or non-positive size counts as 1.
    pub confirmed_headcount: u64,
    pub declined: usize,
    pub wish_count: usize,
}

/// ## Summary
/// Recomputes the statistics of `guests` from scratch.
#[must_use]
pub fn compute_stats(guests: &[Guest]) -> GuestStats {
    guests.iter().fold(GuestStats::default(), |mut stats, guest| {
        stats.invited += 1;
        match guest.attendance_status {
            Some(true) => {
                stats.responded += 1;
                stats.confirmed_headcount += guest
                    .guest_count
                    .and_then(|count| u64::try_from(count).ok())
                    .filter(|&count| count > 0)
                    .unwrap_or(1);
            }
            Some(false) => {
                stats.responded += 1;
                stats.declined += 1;
            }
            None => {}
        }
        if guest.wish().is_some() {
            stats.wish_count += 1;
        }
        stats
    })
}
