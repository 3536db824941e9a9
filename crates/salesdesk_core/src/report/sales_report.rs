//! Sales report filter and aggregator.
//!
//! # Responsibility
//! - Restrict sales to a month or an inclusive day range.
//! - Apply client/seller/concept equality filters.
//! - Sort by date descending and aggregate totals.
//!
//! # Invariants
//! - Month+year, when both set, win over `start_date`/`end_date`.
//! - Day boundaries are evaluated in `ReportFilter::offset`.
//! - `by_concept` keeps first-seen order over the sorted lines.
//! - Empty id filters behave like absent ones.

use crate::model::entity::EntityId;
use crate::model::sale::Sale;
use crate::repo::entity_repo::{CollectionRepository, EntityRepository, RepoError};
use crate::report::directory::NameDirectory;
use crate::store::KeyValueStore;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug)]
pub enum ReportError {
    /// Month index outside 0..=11 or a year chrono cannot represent.
    InvalidPeriod { month: u32, year: i32 },
    Repo(RepoError),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPeriod { month, year } => {
                write!(f, "invalid report period: month index {month}, year {year}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPeriod { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ReportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Filter options of the reports view.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilter {
    /// Zero-based month index (0 = January), as the month selector emits it.
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client_id: Option<EntityId>,
    pub seller_id: Option<EntityId>,
    pub concept_id: Option<EntityId>,
    /// Offset whose calendar days define the date boundaries.
    pub offset: FixedOffset,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            month: None,
            year: None,
            start_date: None,
            end_date: None,
            client_id: None,
            seller_id: None,
            concept_id: None,
            offset: Utc.fix(),
        }
    }
}

impl ReportFilter {
    /// Filter for one calendar month; `month` is zero-based.
    pub fn for_month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Self::default()
        }
    }

    /// Inclusive day range; either end may be open.
    pub fn for_range(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            ..Self::default()
        }
    }

    /// Default range of the reports view: first to last day of `today`'s month.
    pub fn current_month(today: NaiveDate) -> Self {
        let first = today.with_day(1).unwrap_or(today);
        Self::for_range(Some(first), Some(last_day_of_month(first).unwrap_or(today)))
    }

    fn window(&self) -> ReportResult<DateWindow> {
        if let (Some(month), Some(year)) = (self.month, self.year) {
            let invalid = || ReportError::InvalidPeriod { month, year };
            if month > 11 {
                return Err(invalid());
            }
            let first = NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or_else(invalid)?;
            let last = last_day_of_month(first).ok_or_else(invalid)?;
            return Ok(DateWindow {
                start: Some(start_of_day(first, self.offset)),
                end: Some(end_of_day(last, self.offset)),
            });
        }

        Ok(DateWindow {
            start: self.start_date.map(|day| start_of_day(day, self.offset)),
            end: self.end_date.map(|day| end_of_day(day, self.offset)),
        })
    }

    fn matches_refs(&self, sale: &Sale) -> bool {
        id_matches(self.client_id.as_deref(), &sale.client_id)
            && id_matches(self.seller_id.as_deref(), &sale.seller_id)
            && id_matches(self.concept_id.as_deref(), &sale.concept_id)
    }
}

#[derive(Debug, Clone, Copy)]
struct DateWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateWindow {
    fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}

/// One report row: a sale plus its resolved display names.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub sale: Sale,
    pub client_name: String,
    pub seller_name: String,
    pub concept_name: String,
}

/// Summed amount for one concept display name.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptTotal {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesReport {
    /// Filtered sales, newest first.
    pub lines: Vec<ReportLine>,
    pub total: f64,
    /// Chart series, first-seen concept order.
    pub by_concept: Vec<ConceptTotal>,
}

impl SalesReport {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Filters, sorts and aggregates `sales`.
///
/// # Errors
/// - `InvalidPeriod` when month+year do not name a real month.
pub fn build_sales_report(
    sales: &[Sale],
    filter: &ReportFilter,
    directory: &NameDirectory,
) -> ReportResult<SalesReport> {
    let window = filter.window()?;

    let mut lines: Vec<ReportLine> = sales
        .iter()
        .filter(|sale| window.contains(sale.date) && filter.matches_refs(sale))
        .map(|sale| ReportLine {
            sale: sale.clone(),
            client_name: directory.client_name(&sale.client_id).to_string(),
            seller_name: directory.seller_name(&sale.seller_id).to_string(),
            concept_name: directory.concept_name(&sale.concept_id).to_string(),
        })
        .collect();
    lines.sort_by(|a, b| b.sale.date.cmp(&a.sale.date));

    let total: f64 = lines.iter().map(|line| line.sale.amount).sum();

    let by_concept = group_by_concept(&lines);

    Ok(SalesReport {
        lines,
        total,
        by_concept,
    })
}

/// Loads sales and names from `store`, then builds the report.
pub fn run_sales_report<S: KeyValueStore>(
    store: &S,
    filter: &ReportFilter,
) -> ReportResult<SalesReport> {
    let sales = CollectionRepository::<&S, Sale>::new(store).get_all()?;
    let directory = NameDirectory::load(store)?;
    build_sales_report(&sales, filter, &directory)
}

fn group_by_concept(lines: &[ReportLine]) -> Vec<ConceptTotal> {
    let mut totals: Vec<ConceptTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        match positions.get(line.concept_name.as_str()) {
            Some(&index) => totals[index].amount += line.sale.amount,
            None => {
                positions.insert(line.concept_name.as_str(), totals.len());
                totals.push(ConceptTotal {
                    name: line.concept_name.clone(),
                    amount: line.sale.amount,
                });
            }
        }
    }
    totals
}

fn id_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(id) if !id.is_empty() => id == actual,
        _ => true,
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

fn start_of_day(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    to_utc(day.and_time(NaiveTime::MIN), offset)
}

fn end_of_day(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let last = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| day.and_time(NaiveTime::MIN));
    to_utc(last, offset)
}

fn to_utc(local: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    // A fixed offset maps every local time to exactly one instant.
    (local - offset).and_utc()
}

#[cfg(test)]
mod tests {
    use super::{last_day_of_month, ReportFilter};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn last_day_handles_leap_years_and_december() {
        assert_eq!(last_day_of_month(day(2024, 2, 1)), Some(day(2024, 2, 29)));
        assert_eq!(last_day_of_month(day(2023, 2, 1)), Some(day(2023, 2, 28)));
        assert_eq!(last_day_of_month(day(2024, 12, 1)), Some(day(2024, 12, 31)));
    }

    #[test]
    fn current_month_spans_whole_month() {
        let filter = ReportFilter::current_month(day(2024, 4, 17));
        assert_eq!(filter.start_date, Some(day(2024, 4, 1)));
        assert_eq!(filter.end_date, Some(day(2024, 4, 30)));
        assert_eq!(filter.month, None);
    }

    #[test]
    fn month_window_is_inclusive_of_last_millisecond() {
        let window = ReportFilter::for_month(1, 2024).window().unwrap();
        let start = window.start.unwrap();
        let end = window.end.unwrap();
        assert_eq!(start.to_rfc3339(), "2024-02-01T00:00:00+00:00");
        assert_eq!(
            end.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            "2024-02-29T23:59:59.999"
        );
    }
}
