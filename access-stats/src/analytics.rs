use std::{fmt, sync::LazyLock};

use chrono::{NaiveDateTime, Timelike};
use derive_more::Display;
use regex::Regex;
use tracing::debug;

use crate::{invariants::Hour, models::LogRecord};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Firefox,
    Chrome,
    #[display("Internet Explorer")]
    InternetExplorer,
    Safari,
}

// Matching order matters: Chrome user agents also mention Safari.
static BROWSER_PATTERNS: LazyLock<[(Browser, Regex); 4]> = LazyLock::new(|| {
    let pattern = |re: &str| Regex::new(&format!("(?i){re}")).expect("valid regex");
    [
        (Browser::Firefox, pattern("Firefox")),
        (Browser::Chrome, pattern("Chrome")),
        (Browser::InternetExplorer, pattern("MSIE|Trident")),
        (Browser::Safari, pattern("Safari")),
    ]
});

impl Browser {
    /// First category in precedence order whose pattern appears in `agent`.
    pub fn classify(agent: &str) -> Option<Self> {
        BROWSER_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(agent))
            .map(|(browser, _)| *browser)
    }

    fn slot(self) -> usize {
        BROWSER_PATTERNS
            .iter()
            .position(|(b, _)| *b == self)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct ImageHits<'a> {
    pub matches: Vec<&'a LogRecord>,
    pub total: usize,
}

impl<'a> ImageHits<'a> {
    pub fn from_records(records: &'a [LogRecord]) -> Self {
        Self {
            matches: records.iter().filter(|r| r.path.is_image()).collect(),
            total: records.len(),
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.matches.len() as f64 / self.total as f64
        }
    }
}

impl fmt::Display for ImageHits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image requests account for {:.1}% of all requests.",
            self.percentage()
        )
    }
}

/// Hit counts per browser category, indexed in precedence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserPopularity {
    counts: [usize; 4],
}

impl BrowserPopularity {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut popularity = Self::default();
        for browser in records
            .iter()
            .filter_map(|r| Browser::classify(r.browser.as_str()))
        {
            popularity.counts[browser.slot()] += 1;
        }
        popularity
    }

    pub fn counts(&self) -> impl Iterator<Item = (Browser, usize)> + '_ {
        BROWSER_PATTERNS
            .iter()
            .zip(self.counts)
            .map(|((browser, _), count)| (*browser, count))
    }

    /// Category with the highest count. Ties go to the category that comes
    /// first in precedence order. `None` when nothing matched.
    pub fn most_popular(&self) -> Option<(Browser, usize)> {
        self.counts()
            .filter(|(_, count)| *count > 0)
            .fold(None, |best, (browser, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((browser, count)),
            })
    }
}

impl fmt::Display for BrowserPopularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.most_popular() {
            Some((browser, count)) => write!(
                f,
                "The most popular browser is {browser} with {count} hits."
            ),
            None => write!(f, "No browser data found."),
        }
    }
}

/// A record left out of the hourly histogram because its timestamp did not
/// parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampDiagnostic {
    pub raw: String,
}

impl fmt::Display for TimestampDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error parsing date: {}", self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyHits {
    pub buckets: [usize; Hour::COUNT],
    pub skipped: Vec<TimestampDiagnostic>,
}

impl HourlyHits {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut buckets = [0; Hour::COUNT];
        let mut skipped = Vec::new();
        for record in records {
            match hour_of(&record.timestamp) {
                Some(hour) => buckets[hour.index()] += 1,
                None => {
                    debug!(timestamp = %record.timestamp, path = %record.path, "unparseable timestamp");
                    skipped.push(TimestampDiagnostic {
                        raw: record.timestamp.clone(),
                    });
                }
            }
        }
        Self { buckets, skipped }
    }

    pub fn hits(&self, hour: Hour) -> usize {
        self.buckets[hour.index()]
    }
}

impl fmt::Display for HourlyHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.skipped {
            writeln!(f, "{diagnostic}")?;
        }
        let mut hours = Hour::all().peekable();
        while let Some(hour) = hours.next() {
            write!(f, "Hour {hour} has {} hits.", self.hits(hour))?;
            if hours.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

fn hour_of(timestamp: &str) -> Option<Hour> {
    let moment = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    // chrono keeps second 60 as a leap second; a wall clock stops at 59
    if moment.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Hour::try_from(moment.hour()).ok()
}

pub fn analyze_image_hits(records: &[LogRecord]) -> ImageHits<'_> {
    let hits = ImageHits::from_records(records);
    debug!(matches = hits.matches.len(), total = hits.total, "image hits");
    println!("{hits}");
    hits
}

pub fn analyze_browser_popularity(records: &[LogRecord]) -> BrowserPopularity {
    let popularity = BrowserPopularity::from_records(records);
    debug!(counts = ?popularity.counts().collect::<Vec<_>>(), "browser popularity");
    println!("{popularity}");
    popularity
}

pub fn analyze_hourly_hits(records: &[LogRecord]) -> HourlyHits {
    let hourly = HourlyHits::from_records(records);
    debug!(skipped = hourly.skipped.len(), "hourly hits");
    println!("{hourly}");
    hourly
}
