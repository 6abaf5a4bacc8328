use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const MONTHS: usize = 12;

/// Yearly sales of one agent, one total per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSales {
    pub agent: String,
    pub months: [Decimal; MONTHS],
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SalesSummary {
    pub year: i32,
    /// Sorted by normalised agent name.
    pub agents: Vec<AgentSales>,
    pub grand_total: Decimal,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub rows_skipped: usize,
}

impl SalesSummary {
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Accumulates sales rows across the monthly files of one year.
///
/// Agents are merged on their trimmed, upper-cased name. The first spelling seen
/// is kept as the display label.
#[derive(Debug, Default)]
pub struct SalesAggregator {
    year: i32,
    agents: BTreeMap<String, (String, [Decimal; MONTHS])>,
    grand_total: Decimal,
    files_processed: usize,
    files_skipped: usize,
    rows_skipped: usize,
}

impl SalesAggregator {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Adds every row of one monthly file. `month` is 1-based.
    ///
    /// Rows with fewer than three fields are ignored. Rows whose amount is not a
    /// number (header lines included) are counted as skipped.
    pub fn add_file<I, R>(&mut self, month: u32, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[String]>,
    {
        let Some(slot) = month.checked_sub(1).map(|m| m as usize).filter(|m| *m < MONTHS) else {
            self.files_skipped += 1;
            return;
        };

        for row in rows {
            let row = row.as_ref();
            if row.len() < 3 {
                continue;
            }

            let Some(amount) = parse_amount(&row[2]) else {
                self.rows_skipped += 1;
                continue;
            };

            let label = row[1].trim();
            let entry = self
                .agents
                .entry(label.to_uppercase())
                .or_insert_with(|| (label.to_string(), [Decimal::ZERO; MONTHS]));
            entry.1[slot] += amount;
            self.grand_total += amount;
        }

        self.files_processed += 1;
    }

    pub fn skip_file(&mut self) {
        self.files_skipped += 1;
    }

    pub fn finish(self) -> SalesSummary {
        let agents = self
            .agents
            .into_values()
            .map(|(agent, months)| AgentSales {
                agent,
                total: months.iter().sum(),
                months,
            })
            .collect();

        SalesSummary {
            year: self.year,
            agents,
            grand_total: self.grand_total,
            files_processed: self.files_processed,
            files_skipped: self.files_skipped,
            rows_skipped: self.rows_skipped,
        }
    }
}

/// Parses a sales amount such as `200.50`, `-15` or `1,200`.
///
/// Only plain integers and `digits.digits` are accepted after dropping thousands
/// separators; exponents, bare dots and signs other than a leading minus are not.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    let cleaned = cleaned.trim();
    let unsigned = cleaned.strip_prefix('-').unwrap_or(cleaned);

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let well_formed = match unsigned.split_once('.') {
        None => all_digits(unsigned),
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
    };

    if well_formed {
        Decimal::from_str(cleaned).ok()
    } else {
        None
    }
}
