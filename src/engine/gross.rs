use tracing::debug;

use crate::model::{Profile, TimeEntry};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gross {
    pub total_hours: f64,
    pub gross_amount: f64,
}

pub fn entries_for<'a>(
    profile_id: &'a str,
    entries: &'a [TimeEntry],
) -> impl Iterator<Item = &'a TimeEntry> + 'a {
    entries.iter().filter(move |e| e.profile_id == profile_id)
}

/// A profile's entries paired with their hourly rate. Entries whose rate no
/// longer exists on the profile are left out.
pub fn priced_entries<'a>(
    profile: &'a Profile,
    entries: &'a [TimeEntry],
) -> impl Iterator<Item = (&'a TimeEntry, f64)> + 'a {
    entries_for(&profile.id, entries).filter_map(move |entry| {
        match profile.rate(&entry.hourly_rate_id) {
            Some(rate) => Some((entry, rate.rate)),
            None => {
                debug!(
                    profile_id = %profile.id,
                    entry_id = %entry.id,
                    rate_id = %entry.hourly_rate_id,
                    "Skipping entry with unknown hourly rate"
                );
                None
            }
        }
    })
}

/// Hours and pay of one profile. Entries whose rate no longer exists on the
/// profile add neither hours nor pay.
pub fn gross_for(profile: &Profile, entries: &[TimeEntry]) -> Gross {
    let mut gross = Gross::default();

    for (entry, rate) in priced_entries(profile, entries) {
        gross.total_hours += entry.hours;
        gross.gross_amount += entry.hours * rate;
    }

    gross
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{entry, profile_with_rates};

    #[test]
    fn sums_hours_times_matching_rate() {
        let profile = profile_with_rates("alice", &[("std", 20.0), ("ot", 30.0)]);
        let entries = vec![
            entry("alice", "std", 2.0),
            entry("alice", "ot", 1.5),
            entry("bob", "std", 8.0),
        ];

        let gross = gross_for(&profile, &entries);

        assert_eq!(gross.total_hours, 3.5);
        assert_eq!(gross.gross_amount, 2.0 * 20.0 + 1.5 * 30.0);
    }

    #[test]
    fn unknown_rate_contributes_nothing() {
        let profile = profile_with_rates("alice", &[("std", 20.0)]);
        let entries = vec![entry("alice", "std", 2.0), entry("alice", "deleted", 5.0)];

        let gross = gross_for(&profile, &entries);

        assert_eq!(gross.total_hours, 2.0);
        assert_eq!(gross.gross_amount, 40.0);
    }

    #[test]
    fn no_entries_is_zero() {
        let profile = profile_with_rates("alice", &[("std", 20.0)]);
        assert_eq!(gross_for(&profile, &[]), Gross::default());
    }
}
