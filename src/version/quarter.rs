//! Resolution of `Q<n>/<year>` descriptors into end of cloud provisioning facts
//!
//! The upstream overview only states the quarter in which a version leaves the
//! platform. [`QuarterResolver`] turns such a descriptor into the concrete end
//! date and the position of "now" relative to that quarter. Results are cached
//! per descriptor string, so every catalog entry sharing a quarter shares one
//! computation and one notion of "now".

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Remaining days reported whenever "now" is outside the quarter window
pub const NO_REMAINING_DAYS: i64 = -1;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

static QUARTER_DESCRIPTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q([1-4])/(\d+)").unwrap());

/// Source of the current instant
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar facts about the end of cloud provisioning quarter of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EocpFacts {
    /// Last day of the quarter (00:00 UTC)
    pub end_date: DateTime<Utc>,
    /// "Now" is after `end_date`
    pub reached: bool,
    /// "Now" is strictly between quarter start and `end_date`
    pub within_quarter: bool,
    /// Whole days until `end_date`, or [`NO_REMAINING_DAYS`] outside the quarter
    pub remaining_days: i64,
}

impl EocpFacts {
    /// Compute the facts for `quarter` (1-4) of `year` as seen at `now`
    pub fn compute(quarter: u32, year: i32, now: DateTime<Utc>) -> Option<Self> {
        let (start, end) = quarter_bounds(quarter, year)?;

        let within_quarter = start < now && end > now;
        let remaining_days = if within_quarter {
            (end - now).num_milliseconds().abs() / MS_PER_DAY
        } else {
            NO_REMAINING_DAYS
        };

        Some(Self {
            end_date: end,
            reached: now > end,
            within_quarter,
            remaining_days,
        })
    }
}

/// First day of the quarter and last day of its third month, both at 00:00 UTC
fn quarter_bounds(quarter: u32, year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    let start_month = (quarter - 1) * 3 + 1;
    let (next_year, next_month) = if start_month + 3 > 12 {
        (year.checked_add(1)?, start_month + 3 - 12)
    } else {
        (year, start_month + 3)
    };

    let start = NaiveDate::from_ymd_opt(year, start_month, 1)?;
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;

    Some((
        start.and_hms_opt(0, 0, 0)?.and_utc(),
        end.and_hms_opt(0, 0, 0)?.and_utc(),
    ))
}

/// Split a descriptor such as `Q1/2026` into quarter and year
pub fn parse_descriptor(descriptor: &str) -> Option<(u32, i32)> {
    let caps = QUARTER_DESCRIPTOR.captures(descriptor)?;
    let quarter = caps[1].parse().ok()?;
    let year = caps[2].parse().ok()?;
    Some((quarter, year))
}

/// Memoizing resolver from quarter descriptor to [`EocpFacts`]
///
/// An empty or malformed descriptor resolves to `None`, which callers treat as
/// "never reached, never within the quarter".
pub struct QuarterResolver {
    clock: Arc<dyn Clock>,
    cache: Mutex<HashMap<String, Option<EocpFacts>>>,
}

impl QuarterResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolver backed by the wall clock
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Option<EocpFacts>>> {
        // The cache only holds plain values, a panic elsewhere cannot leave it half written
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resolve(&self, descriptor: &str) -> Option<EocpFacts> {
        let mut cache = self.lock_cache();
        if let Some(facts) = cache.get(descriptor) {
            return *facts;
        }

        let facts = parse_descriptor(descriptor)
            .and_then(|(quarter, year)| EocpFacts::compute(quarter, year, self.clock.now()));
        debug!("Resolved quarter {:?}: {:?}", descriptor, facts);

        cache.insert(descriptor.to_string(), facts);
        facts
    }

    /// End of cloud provisioning has passed for the descriptor
    pub fn is_reached(&self, descriptor: &str) -> bool {
        self.resolve(descriptor).is_some_and(|facts| facts.reached)
    }

    /// Drop all memoized facts so the next lookup observes the clock again
    pub fn clear(&self) {
        self.lock_cache().clear();
    }

    pub fn cached_len(&self) -> usize {
        self.lock_cache().len()
    }
}
