// src/tasks/streak.rs
//! Daily completion streaks
//!
//! A task's streak state is `(streak, last_completed_at)`. Toggling on the
//! same calendar day flips between done and not done; completing on the day
//! right after the last completion extends the streak, any longer gap starts
//! over at 1. Days are calendar days in the time zone of `now`, not 24-hour
//! windows. The zone's offset is looked up per instant, so a completion made
//! before a daylight-saving change keeps its own calendar date.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Stored streak fields of a task
#[derive(Debug, Clone)]
pub struct StreakState<Tz: TimeZone> {
    pub streak: i64,
    pub last_completed_at: Option<DateTime<Tz>>,
}

/// Result of a toggle: the new stored fields plus the derived `done` flag
#[derive(Debug, Clone)]
pub struct Toggled<Tz: TimeZone> {
    pub streak: i64,
    pub last_completed_at: Option<DateTime<Tz>>,
    pub done: bool,
}

/// Current server time. Calendar days follow the server's local zone.
pub fn server_now() -> DateTime<Local> {
    Local::now()
}

/// Calendar date of `instant` as seen from `now`'s time zone
fn calendar_date<Tz: TimeZone>(instant: &DateTime<Tz>, now: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&now.timezone()).date_naive()
}

pub fn is_today<Tz: TimeZone>(instant: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    calendar_date(instant, now) == now.date_naive()
}

pub fn is_yesterday<Tz: TimeZone>(instant: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    now.date_naive()
        .pred_opt()
        .map_or(false, |yesterday| calendar_date(instant, now) == yesterday)
}

/// The `done` flag shared by reads and toggles.
pub fn is_done<Tz: TimeZone>(last_completed_at: Option<&DateTime<Tz>>, now: &DateTime<Tz>) -> bool {
    last_completed_at.map_or(false, |last| is_today(last, now))
}

/// Applies one toggle at `now`.
pub fn toggle<Tz: TimeZone>(state: &StreakState<Tz>, now: &DateTime<Tz>) -> Toggled<Tz> {
    let currently_done = is_done(state.last_completed_at.as_ref(), now);

    let (streak, last_completed_at) = if currently_done {
        ((state.streak - 1).max(0), None)
    } else {
        let extends = state
            .last_completed_at
            .as_ref()
            .map_or(false, |last| is_yesterday(last, now));
        let streak = if extends { state.streak + 1 } else { 1 };
        (streak, Some(now.clone()))
    };

    let done = is_done(last_completed_at.as_ref(), now);

    Toggled {
        streak,
        last_completed_at,
        done,
    }
}

/// Parses a stored RFC 3339 completion timestamp into `tz`.
/// Unparseable values read as "never completed".
pub fn parse_completed_at<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(tz))
}
