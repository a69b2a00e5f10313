use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use pharmalert_core::queries::{feed_view, history_view, summarize};
use pharmalert_core::time_format::{format_date, format_time, time_since};
use pharmalert_core::{
    CoreConfig, FeedFilter, Locale, OutcomeFilter, Request, RequestGenerator, RequestStore,
    Response, SystemClock,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pharmalert")]
#[command(about = "Pharmacy medication-request feed CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a batch of synthetic requests as JSON
    Generate {
        /// Number of requests to generate
        #[arg(long, default_value_t = 3)]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Format an elapsed time the way the feed shows it
    TimeSince {
        /// Elapsed seconds (negative values count as zero)
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
        /// Output language (en, fr)
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Seed a store, answer the first request and print the resulting views
    Demo {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Answer given to the first request (available, unavailable)
        #[arg(long, default_value = "unavailable")]
        respond: Response,
        /// Feed tab to print (all, active, responded)
        #[arg(long, default_value = "all")]
        feed: FeedFilter,
        /// History filter (all, available, unavailable)
        #[arg(long, default_value = "all")]
        history: OutcomeFilter,
        /// Output language (en, fr)
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
}

fn status_label(request: &Request, locale: Locale) -> &'static str {
    match (request.response, locale) {
        (None, Locale::En) => "pending",
        (None, Locale::Fr) => "en attente",
        (Some(Response::Available), Locale::En) => "available",
        (Some(Response::Available), Locale::Fr) => "disponible",
        (Some(Response::Unavailable), Locale::En) => "unavailable",
        (Some(Response::Unavailable), Locale::Fr) => "indisponible",
    }
}

/// One feed line: status, medication, patient, distance and age.
fn describe(request: &Request, now: DateTime<Utc>, locale: Locale) -> String {
    let rx = if request.is_prescription_required {
        " [Rx]"
    } else {
        ""
    };
    format!(
        "{} [{}] {}{} - {} ({}, {:.1} km) - {}",
        request.id,
        status_label(request, locale),
        request.medication_name,
        rx,
        request.patient_name,
        request.patient_location,
        request.distance,
        time_since(request.timestamp, now, locale)
    )
}

/// The instant `seconds` before `now`, or `None` if it falls outside chrono's range.
fn instant_before(now: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(chrono::Duration::try_seconds(seconds)?)
}

fn run_demo(
    seed: Option<u64>,
    respond: Response,
    feed: FeedFilter,
    history: OutcomeFilter,
    locale: Locale,
) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(Duration::ZERO, 3, locale, seed)?;
    let store = RequestStore::with_clock(cfg, Arc::new(SystemClock));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(store.initialise());

    if let Some(first) = store.active().first() {
        store.respond(&first.id, respond);
    }

    let now = Utc::now();
    let snapshot = store.snapshot();

    println!("== feed ({})", feed);
    let lines = feed_view(&snapshot, feed);
    if lines.is_empty() {
        println!("No requests.");
    }
    for request in &lines {
        println!("{}", describe(request, now, locale));
    }

    println!("== history ({})", history);
    for group in history_view(&snapshot, history, &Local) {
        println!("{}", format_date(group.date, locale));
        for request in &group.requests {
            println!(
                "  {} {} - {}",
                format_time(request.timestamp, &Local),
                request.medication_name,
                status_label(request, locale)
            );
        }
    }

    let summary = summarize(&snapshot);
    println!("== summary");
    println!("Active requests: {}", summary.active_count);
    println!("Responses given: {}", summary.responses_given);
    match summary.availability_rate {
        Some(rate) => println!("Availability rate: {}%", rate),
        None => println!("Availability rate: n/a"),
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { count, seed }) => {
            let mut generator = RequestGenerator::new(seed, Arc::new(SystemClock));
            match generator.try_generate_batch(count) {
                Ok(batch) => println!("{}", serde_json::to_string_pretty(&batch)?),
                Err(e) => eprintln!("Error generating requests: {}", e),
            }
        }
        Some(Commands::TimeSince { seconds, locale }) => {
            let now = Utc::now();
            match instant_before(now, seconds) {
                Some(past) => println!("{}", time_since(past, now, locale)),
                None => eprintln!("Error: {} seconds is out of range", seconds),
            }
        }
        Some(Commands::Demo {
            seed,
            respond,
            feed,
            history,
            locale,
        }) => run_demo(seed, respond, feed, history, locale)?,
        None => {
            println!("Use 'pharmalert --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pharmalert_core::FixedClock;

    fn request(response: Option<Response>) -> Request {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let mut generator = RequestGenerator::new(Some(4), Arc::new(FixedClock(now)));
        let mut request = generator.generate_one();
        request.timestamp = now - chrono::Duration::seconds(90);
        request.response = response;
        request
    }

    #[test]
    fn describe_pending_request() {
        let request = request(None);
        let now = request.timestamp + chrono::Duration::seconds(90);
        let line = describe(&request, now, Locale::En);

        assert!(line.starts_with(&request.id.to_string()));
        assert!(line.contains("[pending]"));
        assert!(line.contains(&request.medication_name));
        assert!(line.ends_with("1 minute"));
    }

    #[test]
    fn describe_answered_request_in_french() {
        let request = request(Some(Response::Available));
        let now = request.timestamp + chrono::Duration::seconds(90);
        let line = describe(&request, now, Locale::Fr);

        assert!(line.contains("[disponible]"));
        assert!(line.ends_with("1 minute"));
    }

    #[test]
    fn instant_before_handles_extremes() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        assert_eq!(
            instant_before(now, 90),
            Some(now - chrono::Duration::seconds(90))
        );
        assert_eq!(instant_before(now, i64::MAX), None);
        assert_eq!(instant_before(now, i64::MIN), None);
        assert!(instant_before(now, -30).is_some_and(|past| past > now));
    }

    #[test]
    fn cli_parses_demo_flags() {
        let cli = Cli::try_parse_from([
            "pharmalert",
            "demo",
            "--respond",
            "available",
            "--feed",
            "responded",
            "--locale",
            "fr",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Demo {
                respond,
                feed,
                history,
                locale,
                seed,
            }) => {
                assert_eq!(respond, Response::Available);
                assert_eq!(feed, FeedFilter::Responded);
                assert_eq!(history, OutcomeFilter::All);
                assert_eq!(locale, Locale::Fr);
                assert_eq!(seed, None);
            }
            _ => panic!("expected demo command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_response() {
        assert!(Cli::try_parse_from(["pharmalert", "demo", "--respond", "maybe"]).is_err());
    }

    #[test]
    fn cli_rejects_negative_count() {
        assert!(Cli::try_parse_from(["pharmalert", "generate", "--count", "-1"]).is_err());
    }
}
