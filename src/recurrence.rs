//! Expansion of recurring calendar events into concrete occurrences
//!
//! Expansion is a pure function of the seed event and the horizon: the same
//! inputs always produce the same instances with the same ids, so a retry or a
//! fallback from a remote expansion is indistinguishable from the first call.

use chrono::{DateTime, Months, TimeDelta, Utc};

use crate::error::Result;
use crate::model::{CalendarEvent, Frequency, RecurrenceRule};

/// Upper bound on the number of events returned for one seed
pub const MAX_INSTANCES: usize = 5_000;

/// Start of the occurrence following `previous`.
///
/// Month and year steps clamp to the last day of shorter months, and the
/// clamped day carries into later steps.
fn next_start(previous: DateTime<Utc>, rule: &RecurrenceRule) -> Option<DateTime<Utc>> {
    let units = rule.interval;
    match rule.frequency {
        Frequency::Daily => previous.checked_add_signed(TimeDelta::try_days(units)?),
        Frequency::Weekly => previous.checked_add_signed(TimeDelta::try_weeks(units)?),
        Frequency::Monthly => previous.checked_add_months(Months::new(u32::try_from(units).ok()?)),
        Frequency::Yearly => {
            let months = u32::try_from(units.checked_mul(12)?).ok()?;
            previous.checked_add_months(Months::new(months))
        }
        Frequency::Unrecognized(_) => None,
    }
}

/// Deterministic id for a synthesized occurrence
pub fn instance_id(seed_id: &str, start: DateTime<Utc>) -> String {
    format!("{}_{}", seed_id, start.format("%Y%m%dT%H%M%SZ"))
}

/// Expand `seed` into itself followed by every occurrence up to `horizon`.
///
/// Expansion stops before an occurrence that starts after the horizon, after
/// the rule's end date, or beyond the rule's count (seed included). A rule
/// with a non-positive interval or unknown frequency yields just the seed.
pub fn expand(seed: &CalendarEvent, horizon: DateTime<Utc>) -> Vec<CalendarEvent> {
    let mut events = vec![seed.clone()];
    let Some(rule) = &seed.recurring else {
        return events;
    };
    if !rule.is_well_formed() {
        tracing::warn!(
            event = %seed.id,
            frequency = %rule.frequency,
            interval = rule.interval,
            "malformed recurrence rule; treating event as one-off"
        );
        return events;
    }

    let delta = seed
        .end_date
        .map(|end| (end - seed.start_date).max(TimeDelta::zero()));

    let mut anchor = seed.start_date;
    loop {
        let Some(next) = next_start(anchor, rule) else {
            break;
        };
        anchor = next;
        if anchor > horizon {
            break;
        }
        if rule.end_date.is_some_and(|end| anchor > end) {
            break;
        }
        if rule.count.is_some_and(|count| events.len() >= count as usize) {
            break;
        }
        if events.len() >= MAX_INSTANCES {
            tracing::warn!(
                event = %seed.id,
                limit = MAX_INSTANCES,
                "recurrence expansion truncated"
            );
            break;
        }

        events.push(CalendarEvent {
            id: instance_id(&seed.id, anchor),
            start_date: anchor,
            end_date: delta.map(|delta| anchor.checked_add_signed(delta).unwrap_or(anchor)),
            ..seed.clone()
        });
    }

    events
}

/// Expand every event in order, concatenating the results
pub fn expand_all(events: &[CalendarEvent], horizon: DateTime<Utc>) -> Vec<CalendarEvent> {
    events.iter().flat_map(|event| expand(event, horizon)).collect()
}

/// A server-side implementation of the same expansion
pub trait RemoteExpander {
    fn expand(&self, seed: &CalendarEvent, horizon: DateTime<Utc>) -> Result<Vec<CalendarEvent>>;
}

/// Whether two expansions describe the same occurrences (ids may differ)
pub fn same_occurrences(left: &[CalendarEvent], right: &[CalendarEvent]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| a.start_date == b.start_date && a.end_date == b.end_date)
}

/// Prefer the remote expansion, falling back to the local one.
///
/// The remote result is only used when it matches the local expansion
/// occurrence for occurrence, so callers see the same dates either way.
pub fn expand_with_fallback<R: RemoteExpander + ?Sized>(
    remote: &R,
    seed: &CalendarEvent,
    horizon: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    let local = expand(seed, horizon);
    match remote.expand(seed, horizon) {
        Ok(remote_events) if same_occurrences(&remote_events, &local) => remote_events,
        Ok(remote_events) => {
            tracing::warn!(
                event = %seed.id,
                remote = remote_events.len(),
                local = local.len(),
                "remote expansion disagrees with local expansion; using local"
            );
            local
        }
        Err(e) => {
            tracing::warn!(event = %seed.id, error = %e, "remote expansion failed; using local");
            local
        }
    }
}
