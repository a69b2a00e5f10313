//! Read-side projections over store contents.
//!
//! Everything here is a pure function of its inputs: results are recomputed on every call and
//! never cached, so they cannot drift from the store's partition.

use crate::model::Request;
use crate::store::StoreSnapshot;
use chrono::{NaiveDate, TimeZone};
use pharmalert_types::{FeedFilter, OutcomeFilter, Response};
use serde::Serialize;
use std::collections::BTreeMap;

/// Requests sharing one calendar day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub requests: Vec<Request>,
}

/// Headline numbers for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_count: usize,
    pub responses_given: usize,
    pub available_count: usize,
    /// Share of answered requests answered "available", as a rounded percentage.
    /// `None` until at least one request has been answered.
    pub availability_rate: Option<u8>,
}

/// Keeps the requests whose response passes `filter`.
///
/// [`OutcomeFilter::All`] returns the input unchanged; unanswered requests only survive `All`.
pub fn filter_by_outcome(requests: &[Request], filter: OutcomeFilter) -> Vec<Request> {
    requests
        .iter()
        .filter(|request| filter.matches(request.response))
        .cloned()
        .collect()
}

/// Merges both collections into one feed, newest first.
///
/// The sort is stable: requests with equal timestamps keep their relative order (active
/// before processed, then each collection's own order).
pub fn combined_feed(active: &[Request], processed: &[Request]) -> Vec<Request> {
    let mut feed: Vec<Request> = active.iter().chain(processed.iter()).cloned().collect();
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed
}

/// Buckets requests by the calendar day of their timestamp in `tz`.
///
/// Days come out newest first. Inside a day the input order is kept as is.
pub fn group_by_calendar_day<Tz: TimeZone>(requests: &[Request], tz: &Tz) -> Vec<DayGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<Request>> = BTreeMap::new();
    for request in requests {
        let date = request.timestamp.with_timezone(tz).date_naive();
        days.entry(date).or_default().push(request.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, requests)| DayGroup { date, requests })
        .collect()
}

/// The notification feed for one filter tab.
pub fn feed_view(snapshot: &StoreSnapshot, filter: FeedFilter) -> Vec<Request> {
    match filter {
        FeedFilter::All => combined_feed(&snapshot.active, &snapshot.processed),
        FeedFilter::Active => snapshot.active.clone(),
        FeedFilter::Responded => snapshot.processed.clone(),
    }
}

/// The answered-request history: filtered by outcome, then grouped by day.
pub fn history_view<Tz: TimeZone>(
    snapshot: &StoreSnapshot,
    filter: OutcomeFilter,
    tz: &Tz,
) -> Vec<DayGroup> {
    group_by_calendar_day(&filter_by_outcome(&snapshot.processed, filter), tz)
}

/// Counts both collections; the availability rate is rounded half up.
pub fn summarize(snapshot: &StoreSnapshot) -> DashboardSummary {
    let responses_given = snapshot.processed.len();
    let available_count = snapshot
        .processed
        .iter()
        .filter(|request| request.response == Some(Response::Available))
        .count();
    let availability_rate = (responses_given > 0)
        .then(|| ((available_count * 100 + responses_given / 2) / responses_given) as u8);

    DashboardSummary {
        active_count: snapshot.active.len(),
        responses_given,
        available_count,
        availability_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{answered_at, request_at, utc};
    use chrono::{FixedOffset, Utc};
    use pharmalert_uuid::RequestId;

    fn ids(requests: &[Request]) -> Vec<RequestId> {
        requests.iter().map(|r| r.id).collect()
    }

    #[test]
    fn filter_all_is_identity() {
        let requests = vec![
            request_at(utc(2026, 10, 16, 8, 0, 0)),
            answered_at(utc(2026, 10, 16, 9, 0, 0), Response::Available),
        ];
        assert_eq!(filter_by_outcome(&requests, OutcomeFilter::All), requests);
    }

    #[test]
    fn filter_keeps_matching_responses_only() {
        let pending = request_at(utc(2026, 10, 16, 8, 0, 0));
        let yes = answered_at(utc(2026, 10, 16, 9, 0, 0), Response::Available);
        let no = answered_at(utc(2026, 10, 16, 10, 0, 0), Response::Unavailable);
        let requests = vec![pending, yes.clone(), no.clone()];

        assert_eq!(
            ids(&filter_by_outcome(&requests, OutcomeFilter::Available)),
            vec![yes.id]
        );
        assert_eq!(
            ids(&filter_by_outcome(&requests, OutcomeFilter::Unavailable)),
            vec![no.id]
        );
    }

    #[test]
    fn combined_feed_is_newest_first() {
        let old = request_at(utc(2026, 10, 16, 8, 0, 0));
        let new = request_at(utc(2026, 10, 16, 11, 0, 0));
        let mid = answered_at(utc(2026, 10, 16, 9, 30, 0), Response::Available);

        let feed = combined_feed(&[old.clone(), new.clone()], &[mid.clone()]);
        assert_eq!(ids(&feed), vec![new.id, mid.id, old.id]);
    }

    #[test]
    fn combined_feed_is_stable_on_ties() {
        let at = utc(2026, 10, 16, 8, 0, 0);
        let a = request_at(at);
        let b = request_at(at);
        let c = answered_at(at, Response::Unavailable);

        let feed = combined_feed(&[a.clone(), b.clone()], &[c.clone()]);
        assert_eq!(ids(&feed), vec![a.id, b.id, c.id]);
    }

    #[test]
    fn combined_feed_of_nothing() {
        assert!(combined_feed(&[], &[]).is_empty());
    }

    #[test]
    fn groups_newest_day_first_preserving_order() {
        let mon_late = request_at(utc(2026, 10, 12, 22, 0, 0));
        let wed_early = request_at(utc(2026, 10, 14, 7, 0, 0));
        let mon_early = request_at(utc(2026, 10, 12, 6, 0, 0));
        let wed_late = request_at(utc(2026, 10, 14, 20, 0, 0));
        let input = vec![
            mon_late.clone(),
            wed_early.clone(),
            mon_early.clone(),
            wed_late.clone(),
        ];

        let groups = group_by_calendar_day(&input, &Utc);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        assert_eq!(ids(&groups[0].requests), vec![wed_early.id, wed_late.id]);
        assert_eq!(groups[1].date, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(ids(&groups[1].requests), vec![mon_late.id, mon_early.id]);
    }

    #[test]
    fn grouping_uses_the_given_time_zone() {
        let request = request_at(utc(2026, 10, 12, 23, 30, 0));

        let utc_groups = group_by_calendar_day(std::slice::from_ref(&request), &Utc);
        assert_eq!(utc_groups[0].date, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_groups = group_by_calendar_day(std::slice::from_ref(&request), &plus_two);
        assert_eq!(local_groups[0].date, NaiveDate::from_ymd_opt(2026, 10, 13).unwrap());
    }

    #[test]
    fn feed_view_tabs() {
        let active = vec![request_at(utc(2026, 10, 16, 8, 0, 0))];
        let processed = vec![answered_at(utc(2026, 10, 16, 10, 0, 0), Response::Available)];
        let snapshot = StoreSnapshot {
            active: active.clone(),
            processed: processed.clone(),
            loading: false,
        };

        assert_eq!(feed_view(&snapshot, FeedFilter::Active), active);
        assert_eq!(feed_view(&snapshot, FeedFilter::Responded), processed);
        assert_eq!(
            ids(&feed_view(&snapshot, FeedFilter::All)),
            vec![processed[0].id, active[0].id]
        );
    }

    #[test]
    fn history_view_filters_then_groups() {
        let snapshot = StoreSnapshot {
            active: vec![request_at(utc(2026, 10, 16, 8, 0, 0))],
            processed: vec![
                answered_at(utc(2026, 10, 16, 10, 0, 0), Response::Available),
                answered_at(utc(2026, 10, 15, 10, 0, 0), Response::Unavailable),
                answered_at(utc(2026, 10, 15, 9, 0, 0), Response::Available),
            ],
            loading: false,
        };

        let groups = history_view(&snapshot, OutcomeFilter::Available, &Utc);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].requests.len(), 1);
        assert_eq!(groups[1].requests.len(), 1);
        assert_eq!(groups[1].requests[0].id, snapshot.processed[2].id);
    }

    #[test]
    fn summary_counts_and_rate() {
        let at = utc(2026, 10, 16, 8, 0, 0);
        let snapshot = StoreSnapshot {
            active: vec![request_at(at), request_at(at)],
            processed: vec![
                answered_at(at, Response::Available),
                answered_at(at, Response::Available),
                answered_at(at, Response::Unavailable),
            ],
            loading: false,
        };

        let summary = summarize(&snapshot);
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.responses_given, 3);
        assert_eq!(summary.available_count, 2);
        assert_eq!(summary.availability_rate, Some(67));
    }

    #[test]
    fn summary_without_answers_has_no_rate() {
        let summary = summarize(&StoreSnapshot::default());
        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.availability_rate, None);
    }
}
