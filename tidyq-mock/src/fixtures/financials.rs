use chrono::NaiveDate;
use rust_decimal::Decimal;
use tidyq_core::{RawFinancials, RawStatement, StatementLine, StatementPeriod, StatementType};

use super::date;

const ANNUAL: [&str; 4] = ["2016-09-24", "2015-09-26", "2014-09-27", "2013-09-28"];
const QUARTERLY: [&str; 5] = [
    "2016-12-31",
    "2016-09-24",
    "2016-06-25",
    "2016-03-26",
    "2015-12-26",
];

const INCOME: [(&str, i64); 5] = [
    ("Revenue", 215_639),
    ("Cost of Revenue, Total", 131_376),
    ("Gross Profit", 84_263),
    ("Operating Income", 60_024),
    ("Net Income", 45_687),
];

const BALANCE: [(&str, i64); 5] = [
    ("Cash & Equivalents", 20_484),
    ("Total Current Assets", 106_869),
    ("Total Assets", 321_686),
    ("Total Liabilities", 193_437),
    ("Total Equity", 128_249),
];

const CASH_FLOW: [(&str, i64); 4] = [
    ("Cash from Operating Activities", 65_824),
    ("Capital Expenditures", -12_734),
    ("Cash from Financing Activities", -20_483),
    ("Net Change in Cash", -636),
];

fn scale(symbol: &str) -> Option<i64> {
    match symbol {
        "AAPL" => Some(100),
        "MSFT" => Some(40),
        "GOOG" => Some(42),
        _ => None,
    }
}

fn statement(
    statement: StatementType,
    period: StatementPeriod,
    lines: &[(&str, i64)],
    factor: i64,
) -> RawStatement {
    let labels: &[&str] = match period {
        StatementPeriod::Annual => &ANNUAL,
        StatementPeriod::Quarterly => &QUARTERLY,
    };
    let periods: Vec<NaiveDate> = labels.iter().filter_map(|d| date(d)).collect();
    let divisor = match period {
        StatementPeriod::Annual => 100,
        StatementPeriod::Quarterly => 400,
    };
    let lines = lines
        .iter()
        .map(|(category, base)| StatementLine {
            category: (*category).to_string(),
            values: (0_i64..)
                .take(periods.len())
                .map(|i| {
                    // Oldest quarterly cash-flow figures are not reported.
                    if statement == StatementType::CashFlow
                        && period == StatementPeriod::Quarterly
                        && i == 4
                    {
                        return None;
                    }
                    Some(Decimal::from(base * factor * (20 - i) / 20 / divisor))
                })
                .collect(),
        })
        .collect();
    RawStatement {
        statement,
        period,
        periods,
        lines,
    }
}

/// Annual and quarterly statements for a covered symbol.
pub fn by_symbol(symbol: &str) -> Option<RawFinancials> {
    let factor = scale(symbol)?;
    let mut statements = Vec::with_capacity(6);
    for period in [StatementPeriod::Annual, StatementPeriod::Quarterly] {
        statements.push(statement(
            StatementType::CashFlow,
            period,
            &CASH_FLOW,
            factor,
        ));
        statements.push(statement(
            StatementType::IncomeStatement,
            period,
            &INCOME,
            factor,
        ));
        statements.push(statement(
            StatementType::BalanceSheet,
            period,
            &BALANCE,
            factor,
        ));
    }
    Some(RawFinancials { statements })
}
