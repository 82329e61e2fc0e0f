//! Turns raw query parameters into a validated [TransactionFilter].
//!
//! Every view of the data (listing, charts, statistics) is built from the
//! same filter type so that a combined request sees one consistent scope.

use serde::Deserialize;
use time::{
    Date, Month, OffsetDateTime, Time, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The last representable millisecond of a day.
const END_OF_DAY: Time = time::macros::time!(23:59:59.999);

const INVALID_MONTH: &str =
    "Invalid month format. Please provide a valid month between 1 and 12.";
const MISSING_SCOPE: &str = "Please provide a month, or a startDate and an endDate.";
const INVALID_RANGE: &str = "Invalid startDate or endDate. Use YYYY-MM-DD or an RFC 3339 date-time.";
const INVALID_SOLD: &str = "Invalid sold filter. Use one of \"true\", \"false\" or \"both\".";

/// The raw, unvalidated filter parameters of a request.
///
/// Blank values are treated the same as missing ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// A month number, "1" to "12".
    pub month: Option<String>,
    /// The first day of a date range.
    #[serde(alias = "startOfMonth")]
    pub start_date: Option<String>,
    /// The last day of a date range, inclusive.
    #[serde(alias = "endOfMonth")]
    pub end_date: Option<String>,
    /// "true", "false" or "both".
    pub sold: Option<String>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<String>,
}

/// Whether a request must be scoped to a month or a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRequirement {
    /// A month or a complete date range must be given. Used by the charts
    /// and statistics.
    Required,
    /// The date scope is optional and a range that cannot be parsed is
    /// skipped. Used by the transaction listing.
    Optional,
}

/// Which transactions to include based on whether they sold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SoldFilter {
    /// Only sold transactions.
    Sold,
    /// Only unsold transactions.
    Unsold,
    /// No constraint.
    #[default]
    Both,
}

/// The calendar scope of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// Sales in this month of any year.
    Month(Month),
    /// Sales between `start` and `end`, both inclusive.
    Range {
        /// The first instant of the range.
        start: OffsetDateTime,
        /// The last instant of the range.
        end: OffsetDateTime,
    },
}

/// A validated, normalized set of filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Restricts the date of sale, if set.
    pub date_scope: Option<DateScope>,
    /// Restricts the sold flag.
    pub sold: SoldFilter,
    /// Case-insensitive substring the title must contain.
    pub title_contains: Option<String>,
    /// Case-insensitive substring the description must contain.
    pub description_contains: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

/// Validate `params` and build a [TransactionFilter].
///
/// A month takes precedence over a date range. The end of a date range is
/// moved to the last millisecond of its day. Price bounds that do not parse
/// as numbers are ignored.
///
/// # Errors
/// Returns [Error::Validation] if:
/// - the month is not a one or two digit number between 1 and 12,
/// - `scope` is [ScopeRequirement::Required] and neither a month nor both
///   range dates are given, or a range date does not parse,
/// - the sold filter is not "true", "false" or "both".
pub fn build_filter(
    params: &FilterParams,
    scope: ScopeRequirement,
) -> Result<TransactionFilter, Error> {
    Ok(TransactionFilter {
        date_scope: parse_date_scope(params, scope)?,
        sold: parse_sold_filter(non_blank(&params.sold))?,
        title_contains: non_blank(&params.title).map(str::to_owned),
        description_contains: non_blank(&params.description).map(str::to_owned),
        min_price: non_blank(&params.min_price).and_then(parse_price),
        max_price: non_blank(&params.max_price).and_then(parse_price),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_date_scope(
    params: &FilterParams,
    scope: ScopeRequirement,
) -> Result<Option<DateScope>, Error> {
    // Only a blank month counts as absent, padding around digits is invalid.
    if let Some(month) = params.month.as_deref().filter(|month| !month.trim().is_empty()) {
        return parse_month(month).map(|month| Some(DateScope::Month(month)));
    }

    let start = non_blank(&params.start_date);
    let end = non_blank(&params.end_date);

    match (scope, start, end) {
        (ScopeRequirement::Required, Some(start), Some(end)) => {
            match (parse_date_time(start), parse_date_time(end)) {
                (Some(start), Some(end)) => Ok(Some(date_range(start, end))),
                _ => Err(Error::Validation(INVALID_RANGE.to_owned())),
            }
        }
        (ScopeRequirement::Required, _, _) => Err(Error::Validation(MISSING_SCOPE.to_owned())),
        (ScopeRequirement::Optional, Some(start), Some(end)) => {
            let range = parse_date_time(start)
                .zip(parse_date_time(end))
                .map(|(start, end)| date_range(start, end));

            if range.is_none() {
                tracing::debug!("ignoring unparsable date range {start:?} to {end:?}");
            }

            Ok(range)
        }
        (ScopeRequirement::Optional, _, _) => Ok(None),
    }
}

fn date_range(start: OffsetDateTime, end: OffsetDateTime) -> DateScope {
    DateScope::Range {
        start,
        end: end.replace_time(END_OF_DAY),
    }
}

/// Parse a month number, which must be one or two ASCII digits between 1 and 12.
fn parse_month(raw: &str) -> Result<Month, Error> {
    let is_one_or_two_digits =
        (1..=2).contains(&raw.len()) && raw.bytes().all(|byte| byte.is_ascii_digit());

    is_one_or_two_digits
        .then(|| raw.parse::<u8>().ok())
        .flatten()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(|| Error::Validation(INVALID_MONTH.to_owned()))
}

/// Parse either an RFC 3339 date-time or a plain date, which is taken to
/// mean midnight UTC.
fn parse_date_time(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).ok().or_else(|| {
        Date::parse(raw, DATE_FORMAT)
            .ok()
            .map(|date| date.midnight().assume_utc())
    })
}

fn parse_sold_filter(raw: Option<&str>) -> Result<SoldFilter, Error> {
    match raw {
        None | Some("both") => Ok(SoldFilter::Both),
        Some("true") => Ok(SoldFilter::Sold),
        Some("false") => Ok(SoldFilter::Unsold),
        Some(_) => Err(Error::Validation(INVALID_SOLD.to_owned())),
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|price| price.is_finite())
}
