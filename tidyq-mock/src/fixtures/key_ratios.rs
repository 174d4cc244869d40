//! Key-ratio report bodies in the upstream CSV export shape.

/// Body served for listings the venue does not carry.
pub const PLACEHOLDER: &str = "We’re sorry. There is no available information in our database to display.";

const FINANCIALS: [&str; 15] = [
    "Revenue USD Mil",
    "Gross Margin %",
    "Operating Income USD Mil",
    "Operating Margin %",
    "Net Income USD Mil",
    "Earnings Per Share USD",
    "Dividends USD",
    "Payout Ratio % *",
    "Shares Mil",
    "Book Value Per Share * USD",
    "Operating Cash Flow USD Mil",
    "Cap Spending USD Mil",
    "Free Cash Flow USD Mil",
    "Free Cash Flow Per Share * USD",
    "Working Capital USD Mil",
];

const MARGINS: [&str; 9] = [
    "Revenue",
    "COGS",
    "Gross Margin",
    "SG&A",
    "R&D",
    "Other",
    "Operating Margin",
    "Net Int Inc & Other",
    "EBT Margin",
];

const PROFITABILITY: [&str; 8] = [
    "Tax Rate %",
    "Net Margin %",
    "Asset Turnover (Average)",
    "Return on Assets %",
    "Financial Leverage (Average)",
    "Return on Equity %",
    "Return on Invested Capital %",
    "Interest Coverage",
];

const GROWTH_BLOCKS: [&str; 4] = ["Revenue %", "Operating Income %", "Net Income %", "EPS %"];

const GROWTH_ROWS: [&str; 4] = [
    "Year over Year",
    "3-Year Average",
    "5-Year Average",
    "10-Year Average",
];

const CASH_FLOW: [&str; 5] = [
    "Operating Cash Flow Growth % YOY",
    "Free Cash Flow Growth % YOY",
    "Cap Ex as a % of Sales",
    "Free Cash Flow/Sales %",
    "Free Cash Flow/Net Income",
];

const BALANCE_SHEET: [&str; 20] = [
    "Cash & Short-Term Investments",
    "Accounts Receivable",
    "Inventory",
    "Other Current Assets",
    "Total Current Assets",
    "Net PP&E",
    "Intangibles",
    "Other Long-Term Assets",
    "Total Assets",
    "Accounts Payable",
    "Short-Term Debt",
    "Taxes Payable",
    "Accrued Liabilities",
    "Other Short-Term Liabilities",
    "Total Current Liabilities",
    "Long-Term Debt",
    "Other Long-Term Liabilities",
    "Total Liabilities",
    "Total Stockholders' Equity",
    "Total Liabilities & Equity",
];

const LIQUIDITY: [&str; 4] = [
    "Current Ratio",
    "Quick Ratio",
    "Financial Leverage",
    "Debt/Equity",
];

const EFFICIENCY: [&str; 8] = [
    "Days Sales Outstanding",
    "Days Inventory",
    "Payables Period",
    "Cash Conversion Cycle",
    "Receivables Turnover",
    "Inventory Turnover",
    "Fixed Assets Turnover",
    "Asset Turnover",
];

/// Which report variant to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// 111 lines, five cash-flow ratios.
    Full,
    /// 110 lines, the last cash-flow ratio missing.
    Patched,
}

struct Listing {
    company: &'static str,
    last_fiscal_year: i32,
    fiscal_month: u32,
    variant: Variant,
}

fn listing(venue: &str, symbol: &str) -> Option<Listing> {
    let l = |company, last_fiscal_year, fiscal_month, variant| Listing {
        company,
        last_fiscal_year,
        fiscal_month,
        variant,
    };
    match (venue, symbol) {
        ("XNAS", "AAPL") => Some(l("Apple Inc", 2016, 9, Variant::Full)),
        ("XNAS", "MSFT") => Some(l("Microsoft Corp", 2016, 6, Variant::Full)),
        ("XNAS", "GOOG") => Some(l("Alphabet Inc", 2016, 12, Variant::Full)),
        ("XNYS", "IBM") => Some(l("International Business Machines Corp", 2016, 12, Variant::Full)),
        ("XNYS", "GE") => Some(l("General Electric Co", 2016, 12, Variant::Patched)),
        _ => None,
    }
}

fn periods(last: i32, month: u32, trailing: &str) -> String {
    let mut out = String::new();
    for year in (last - 9)..=last {
        out.push_str(&format!(",{year}-{month:02}"));
    }
    out.push(',');
    out.push_str(trailing);
    out
}

fn quoted(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0 { "-" } else { "" };
    format!("\"{sign}{grouped}\"")
}

fn cents(v: i64) -> String {
    let sign = if v < 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", v.abs() / 100, v.abs() % 100)
}

/// Financials row `row` for fiscal column `i` (0 = oldest, 10 = TTM).
fn financial_cell(row: usize, i: i64) -> String {
    match row {
        0 => quoted(20_000 + i * 20_000),
        2 => quoted(5_000 + i * 5_000),
        4 => quoted(3_500 + i * 4_000),
        5 => cents(100 + i * 90),
        8 => quoted(6_000 - i * 100),
        9 => cents(500 + i * 200),
        10 => quoted(5_000 + i * 6_000),
        11 => quoted(-(1_000 + i * 1_200)),
        12 => quoted(4_000 + i * 4_800),
        // Dividends were not paid in the early years.
        6 | 7 if i < 5 => String::new(),
        _ => cents(1_000 + (i * 37 + i64::try_from(row).unwrap_or(0) * 113) % 4_000),
    }
}

fn generic_cell(seed: usize, i: i64) -> String {
    let seed = i64::try_from(seed).unwrap_or(0);
    cents(100 + (seed * 211 + i * 59) % 3_000)
}

fn data_rows(out: &mut Vec<String>, labels: &[&str], offset: usize, columns: i64) {
    for (k, label) in labels.iter().enumerate() {
        let cells: Vec<String> = (0..columns).map(|i| generic_cell(offset + k, i)).collect();
        out.push(format!("{label},{}", cells.join(",")));
    }
}

/// Render a complete report body.
pub fn render(company: &str, last: i32, month: u32, variant: Variant) -> String {
    let yearly = periods(last, month, "TTM");
    let mut out: Vec<String> = Vec::with_capacity(111);

    out.push(format!(
        "Growth Profitability and Financial Ratios for {company}"
    ));
    out.push(String::new());
    out.push("Key Ratios -> Financial".to_string());
    out.push(yearly.clone());
    for (row, label) in FINANCIALS.iter().enumerate() {
        let cells: Vec<String> = (0..11).map(|i| financial_cell(row, i)).collect();
        out.push(format!("{label},{}", cells.join(",")));
    }

    out.push(String::new());
    out.push("Key Ratios -> Profitability".to_string());
    out.push(format!("Margins % of Sales{yearly}"));
    data_rows(&mut out, &MARGINS, 20, 11);
    out.push(format!("Profitability{yearly}"));
    data_rows(&mut out, &PROFITABILITY, 30, 11);

    out.push(String::new());
    out.push("Key Ratios -> Growth".to_string());
    out.push(String::new());
    out.push(periods(last, month, "Latest Qtr"));
    for (b, block) in GROWTH_BLOCKS.iter().enumerate() {
        out.push((*block).to_string());
        data_rows(&mut out, &GROWTH_ROWS, 40 + b * 4, 11);
    }

    out.push(String::new());
    out.push("Key Ratios -> Cash Flow".to_string());
    out.push(format!("Cash Flow Ratios{yearly}"));
    let cash_flow = match variant {
        Variant::Full => &CASH_FLOW[..],
        Variant::Patched => &CASH_FLOW[..4],
    };
    data_rows(&mut out, cash_flow, 60, 11);

    out.push(String::new());
    out.push("Key Ratios -> Financial Health".to_string());
    let recent = format!(",{}-{month:02},{last}-{month:02}", last - 1);
    out.push(format!("Balance Sheet Items (in %){recent}"));
    data_rows(&mut out, &BALANCE_SHEET, 70, 2);
    out.push(format!("Liquidity/Financial Health{recent}"));
    data_rows(&mut out, &LIQUIDITY, 90, 2);

    out.push(String::new());
    out.push("Key Ratios -> Efficiency Ratios".to_string());
    out.push(format!("Efficiency{yearly}"));
    data_rows(&mut out, &EFFICIENCY, 100, 11);

    let mut body = out.join("\n");
    body.push('\n');
    body
}

/// Report body for a listing, or `None` when the venue does not carry it.
///
/// `BROKEN` renders a truncated report on every venue.
pub fn by_venue(venue: &str, symbol: &str) -> Option<String> {
    if symbol == "BROKEN" {
        let full = render("Broken Data Corp", 2016, 12, Variant::Full);
        return Some(full.lines().take(100).collect::<Vec<_>>().join("\n"));
    }
    let l = listing(venue, symbol)?;
    Some(render(l.company, l.last_fiscal_year, l.fiscal_month, l.variant))
}
