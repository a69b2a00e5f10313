//! Human-readable time strings for the feed.
//!
//! - [`time_since`]: coarse elapsed time ("5 minutes", "quelques secondes").
//! - [`format_date`]: day-group headers ("Friday 16 October 2026").
//! - [`format_time`]: time of day ("14:05").

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use pharmalert_types::Locale;
use std::fmt::Display;

const SECONDS_PER_YEAR: i64 = 31_536_000;
const SECONDS_PER_MONTH: i64 = 2_592_000;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Below this many seconds the elapsed time is just "a few seconds".
const FEW_SECONDS_THRESHOLD: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Checked largest first; the first band with a quotient of at least one wins.
const BANDS: [(Unit, i64); 5] = [
    (Unit::Year, SECONDS_PER_YEAR),
    (Unit::Month, SECONDS_PER_MONTH),
    (Unit::Day, SECONDS_PER_DAY),
    (Unit::Hour, SECONDS_PER_HOUR),
    (Unit::Minute, SECONDS_PER_MINUTE),
];

fn unit_words(unit: Unit, locale: Locale) -> (&'static str, &'static str) {
    match (locale, unit) {
        (Locale::En, Unit::Year) => ("year", "years"),
        (Locale::En, Unit::Month) => ("month", "months"),
        (Locale::En, Unit::Day) => ("day", "days"),
        (Locale::En, Unit::Hour) => ("hour", "hours"),
        (Locale::En, Unit::Minute) => ("minute", "minutes"),
        (Locale::En, Unit::Second) => ("second", "seconds"),
        (Locale::Fr, Unit::Year) => ("an", "ans"),
        (Locale::Fr, Unit::Month) => ("mois", "mois"),
        (Locale::Fr, Unit::Day) => ("jour", "jours"),
        (Locale::Fr, Unit::Hour) => ("heure", "heures"),
        (Locale::Fr, Unit::Minute) => ("minute", "minutes"),
        (Locale::Fr, Unit::Second) => ("seconde", "secondes"),
    }
}

fn quantity(count: i64, unit: Unit, locale: Locale) -> String {
    let (singular, plural) = unit_words(unit, locale);
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Formats the time elapsed between `past` and `now`.
///
/// Elapsed seconds are floored; a `past` later than `now` counts as zero elapsed time, so
/// clock skew never produces a negative phrase.
pub fn time_since(past: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let seconds = (now - past).num_seconds().max(0);

    for (unit, divisor) in BANDS {
        let count = seconds / divisor;
        if count >= 1 {
            return quantity(count, unit, locale);
        }
    }

    if seconds < FEW_SECONDS_THRESHOLD {
        match locale {
            Locale::En => "a few seconds".to_owned(),
            Locale::Fr => "quelques secondes".to_owned(),
        }
    } else {
        quantity(seconds, Unit::Second, locale)
    }
}

fn chrono_locale(locale: Locale) -> chrono::Locale {
    match locale {
        Locale::En => chrono::Locale::en_GB,
        Locale::Fr => chrono::Locale::fr_FR,
    }
}

/// Formats a calendar date as a long, localised header: weekday, day, month, year.
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .format_localized("%A %-d %B %Y", chrono_locale(locale))
        .to_string()
}

/// Formats the time of day of `timestamp` in `tz` as zero-padded 24-hour `HH:MM`.
pub fn format_time<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}
