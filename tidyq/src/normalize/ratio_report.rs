//! Key-ratio report parsing.
//!
//! The upstream report is a semi-structured CSV: section markers
//! (`Key Ratios -> Growth`), period header rows, single-field sub-headers and
//! data rows. Which section and sub-section each data row belongs to is not
//! recoverable from the text alone, so rows are assigned by position against a
//! layout template chosen from the raw line count.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tidyq_core::{TidyTable, TidyqError, Value};

use super::{parse_decimal, split_csv_line};

const SOURCE: &str = "morningstar";

/// Section name of the computed valuation block.
pub const VALUATION_SECTION: &str = "Valuation Ratios";

/// A run of consecutive data rows sharing section and sub-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupBlock {
    /// Report section.
    pub section: &'static str,
    /// Sub-section within the section.
    pub sub_section: &'static str,
    /// Number of data rows in the run.
    pub rows: u32,
}

/// Positional template for one known report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    /// Layout label used in messages.
    pub name: &'static str,
    /// Raw line count identifying the layout.
    pub raw_lines: usize,
    /// Data-row runs in report order.
    pub blocks: &'static [GroupBlock],
}

impl ReportLayout {
    /// Total number of data rows (groups) the template expects.
    #[must_use]
    pub fn groups(&self) -> u32 {
        self.blocks.iter().map(|b| b.rows).sum()
    }

    /// Block holding the 1-based data row `ordinal`.
    #[must_use]
    pub fn locate(&self, ordinal: u32) -> Option<&GroupBlock> {
        let mut end = 0;
        self.blocks.iter().find(|b| {
            end += b.rows;
            ordinal <= end
        })
    }
}

const fn block(section: &'static str, sub_section: &'static str, rows: u32) -> GroupBlock {
    GroupBlock {
        section,
        sub_section,
        rows,
    }
}

const FULL_BLOCKS: [GroupBlock; 11] = [
    block("Financials", "Financials", 15),
    block("Profitability", "Margins % of Sales", 9),
    block("Profitability", "Profitability", 8),
    block("Growth", "Revenue %", 4),
    block("Growth", "Operating Income %", 4),
    block("Growth", "Net Income %", 4),
    block("Growth", "EPS %", 4),
    block("Cash Flow", "Cash Flow Ratios", 5),
    block("Financial Health", "Balance Sheet Items (in %)", 20),
    block("Financial Health", "Liquidity/Financial Health", 4),
    block("Efficiency Ratios", "Efficiency", 8),
];

const PATCHED_BLOCKS: [GroupBlock; 11] = [
    block("Financials", "Financials", 15),
    block("Profitability", "Margins % of Sales", 9),
    block("Profitability", "Profitability", 8),
    block("Growth", "Revenue %", 4),
    block("Growth", "Operating Income %", 4),
    block("Growth", "Net Income %", 4),
    block("Growth", "EPS %", 4),
    block("Cash Flow", "Cash Flow Ratios", 4),
    block("Financial Health", "Balance Sheet Items (in %)", 20),
    block("Financial Health", "Liquidity/Financial Health", 4),
    block("Efficiency Ratios", "Efficiency", 8),
];

/// Standard 111-line report, 85 groups.
pub const FULL_LAYOUT: ReportLayout = ReportLayout {
    name: "full",
    raw_lines: 111,
    blocks: &FULL_BLOCKS,
};

/// 110-line report whose Cash Flow block has one row fewer, 84 groups.
pub const PATCHED_LAYOUT: ReportLayout = ReportLayout {
    name: "patched",
    raw_lines: 110,
    blocks: &PATCHED_BLOCKS,
};

/// Chooses the positional template for a report body.
pub trait LayoutDetector: Send + Sync {
    /// Select the layout for `body`.
    ///
    /// # Errors
    /// `UpstreamFault` when the body matches no known layout.
    fn detect(&self, body: &str) -> Result<ReportLayout, TidyqError>;
}

/// Selects a layout by raw line count (111 → full, 110 → patched).
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCountLayout;

impl LayoutDetector for LineCountLayout {
    fn detect(&self, body: &str) -> Result<ReportLayout, TidyqError> {
        let n = raw_line_count(body);
        [FULL_LAYOUT, PATCHED_LAYOUT]
            .into_iter()
            .find(|l| l.raw_lines == n)
            .ok_or_else(|| {
                TidyqError::upstream(
                    SOURCE,
                    format!("unrecognized key ratio layout: {n} lines (expected 110 or 111)"),
                )
            })
    }
}

/// Lines in the body, ignoring trailing blank lines.
#[must_use]
pub fn raw_line_count(body: &str) -> usize {
    body.trim_end().lines().count()
}

/// Whether `body` is the provider's not-found placeholder.
#[must_use]
pub fn is_placeholder(body: &str) -> bool {
    let b = body.trim();
    if b.is_empty() {
        return true;
    }
    let lower = b.to_lowercase();
    lower.contains("we're sorry") || lower.contains("we’re sorry")
}

/// One long-form observation of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatioRow {
    /// Report section.
    pub section: &'static str,
    /// Sub-section.
    pub sub_section: &'static str,
    /// 1-based data-row ordinal.
    pub group: u32,
    /// Row label, e.g. "Revenue USD Mil".
    pub category: String,
    /// Period date.
    pub date: NaiveDate,
    /// Whether the period is trailing (`TTM` / `Latest Qtr`).
    pub trailing: bool,
    /// Observation; `None` for blank cells.
    pub value: Option<Decimal>,
}

/// Parse a period label: `YYYY-MM` → month start, `TTM`/`Latest Qtr` → `as_of`.
#[must_use]
pub fn parse_period(label: &str, as_of: NaiveDate) -> Option<(NaiveDate, bool)> {
    let label = label.trim();
    if label.eq_ignore_ascii_case("TTM") || label.eq_ignore_ascii_case("Latest Qtr") {
        return Some((as_of, true));
    }
    let (y, m) = label.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)?;
    Some((date, false))
}

fn header_periods(fields: &[String], as_of: NaiveDate) -> Option<Vec<(NaiveDate, bool)>> {
    let labels = fields.get(1..)?;
    if labels.iter().all(String::is_empty) {
        return None;
    }
    labels
        .iter()
        .map(|l| parse_period(l, as_of))
        .collect::<Option<Vec<_>>>()
}

/// Parse a report body into long rows using `layout`.
///
/// # Errors
/// `UpstreamFault` when a data row precedes any period header, a row is wider
/// than its header, or the number of data rows differs from the template.
pub fn parse_report(
    body: &str,
    layout: &ReportLayout,
    as_of: NaiveDate,
) -> Result<Vec<RatioRow>, TidyqError> {
    let mut rows = Vec::new();
    let mut periods: Option<Vec<(NaiveDate, bool)>> = None;
    let mut ordinal: u32 = 0;

    for line in body.trim_end().lines() {
        let fields = split_csv_line(line, SOURCE)?;
        if fields.len() <= 1 {
            continue;
        }
        if let Some(p) = header_periods(&fields, as_of) {
            periods = Some(p);
            continue;
        }

        ordinal += 1;
        let Some(current) = periods.as_ref() else {
            return Err(TidyqError::upstream(
                SOURCE,
                format!("data row '{}' precedes any period header", fields[0]),
            ));
        };
        let values = &fields[1..];
        if values.len() > current.len() {
            return Err(TidyqError::upstream(
                SOURCE,
                format!(
                    "row '{}' has {} values for {} periods",
                    fields[0],
                    values.len(),
                    current.len()
                ),
            ));
        }
        let Some(blk) = layout.locate(ordinal) else {
            return Err(row_count_mismatch(layout, ordinal));
        };
        for (i, (date, trailing)) in current.iter().enumerate() {
            rows.push(RatioRow {
                section: blk.section,
                sub_section: blk.sub_section,
                group: ordinal,
                category: fields[0].clone(),
                date: *date,
                trailing: *trailing,
                value: values.get(i).and_then(|c| parse_decimal(c)),
            });
        }
    }

    if ordinal != layout.groups() {
        return Err(row_count_mismatch(layout, ordinal));
    }
    Ok(rows)
}

fn row_count_mismatch(layout: &ReportLayout, found: u32) -> TidyqError {
    TidyqError::upstream(
        SOURCE,
        format!(
            "{} layout expects {} data rows, found at least {found}",
            layout.name,
            layout.groups()
        ),
    )
}

/// Year-end close per calendar year from a `date`/`close` price table.
#[must_use]
pub fn year_end_closes(prices: &TidyTable) -> BTreeMap<i32, Decimal> {
    let (Some(di), Some(ci)) = (prices.column_index("date"), prices.column_index("close")) else {
        return BTreeMap::new();
    };
    let mut last: BTreeMap<i32, (NaiveDate, Decimal)> = BTreeMap::new();
    for row in prices.rows() {
        if let (Some(d), Some(c)) = (row[di].as_date(), row[ci].as_number()) {
            let e = last.entry(d.year()).or_insert((d, c));
            if d >= e.0 {
                *e = (d, c);
            }
        }
    }
    last.into_iter().map(|(y, (_, c))| (y, c)).collect()
}

fn lookup(rows: &[RatioRow], prefix: &str, date: NaiveDate) -> Option<Decimal> {
    rows.iter()
        .find(|r| {
            r.section == "Financials"
                && !r.trailing
                && r.date == date
                && r.category.starts_with(prefix)
        })
        .and_then(|r| r.value)
}

fn div(num: Option<Decimal>, den: Option<Decimal>) -> Option<Decimal> {
    let (n, d) = (num?, den?);
    if d.is_zero() {
        return None;
    }
    n.checked_div(d)
}

/// Compute price-to-earnings, sales, book and cash flow for every fiscal
/// period of the Financials section, joining year-end closes on fiscal year.
#[must_use]
pub fn valuation_rows(
    rows: &[RatioRow],
    closes: &BTreeMap<i32, Decimal>,
    first_group: u32,
) -> Vec<RatioRow> {
    let mut dates: Vec<NaiveDate> = rows
        .iter()
        .filter(|r| r.section == "Financials" && !r.trailing)
        .map(|r| r.date)
        .collect();
    dates.sort_unstable();
    dates.dedup();

    let names = [
        "Price to Earnings",
        "Price to Sales",
        "Price to Book",
        "Price to Cash Flow",
    ];
    let mut out = Vec::with_capacity(dates.len() * names.len());
    for (offset, name) in (0_u32..).zip(names) {
        for &date in &dates {
            let price = closes.get(&date.year()).copied();
            let shares = lookup(rows, "Shares", date);
            let per_share = |prefix: &str| div(lookup(rows, prefix, date), shares);
            let value = match offset {
                0 => div(price, lookup(rows, "Earnings Per Share", date)),
                1 => div(price, per_share("Revenue")),
                2 => div(price, lookup(rows, "Book Value Per Share", date)),
                _ => div(price, per_share("Operating Cash Flow")),
            }
            .map(|v| v.round_dp(2));
            out.push(RatioRow {
                section: VALUATION_SECTION,
                sub_section: VALUATION_SECTION,
                group: first_group + offset,
                category: name.to_string(),
                date,
                trailing: false,
                value,
            });
        }
    }
    out
}

/// Nest long rows into a `section, data` table in report order.
///
/// # Errors
/// Propagates table construction errors.
pub fn ratio_rows_to_table(rows: &[RatioRow]) -> Result<TidyTable, TidyqError> {
    let mut long = TidyTable::new(["section", "sub_section", "group", "category", "date", "value"]);
    for r in rows {
        long.push_row(vec![
            Value::from(r.section),
            Value::from(r.sub_section),
            Value::from(i64::from(r.group)),
            Value::from(r.category.as_str()),
            Value::from(r.date),
            Value::from(r.value),
        ])?;
    }
    long.nest_by(&["section"], "data")
}
