//! Bulk price-update payload: `sku,price,reason` per line.
//!
//! Bad lines are dropped, never raised as errors. The header line of the
//! sample template is not special-cased; its price column (`price`) does not
//! parse, so it drops out like any other malformed row.

use serde::Serialize;

/// Reason recorded when a bulk row leaves the reason column blank.
pub const DEFAULT_BULK_REASON: &str = "Bulk Price Adjustment";

/// Downloadable sample of the bulk-update format.
pub const SAMPLE_TEMPLATE: &str = "sku,price,reason\n\
IFS-1000-B,950.00,Seasonal Discount\n\
ECOS-2024-ENT,2350.00,Annual Adjustment\n";

/// A validated bulk-update row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkPriceRow {
    pub sku: String,
    pub price: f64,
    /// May be empty; see [`BulkPriceRow::effective_reason`].
    pub reason: String,
}

impl BulkPriceRow {
    /// Validate raw (already trimmed) field text.
    pub fn parse(sku: &str, price: &str, reason: &str) -> Result<Self, SkipReason> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Err(SkipReason::BlankSku);
        }

        let price = parse_price(price)
            .ok_or_else(|| SkipReason::InvalidPrice(price.trim().to_string()))?;

        Ok(Self {
            sku: sku.to_string(),
            price,
            reason: reason.trim().to_string(),
        })
    }

    /// True when the row would pass [`BulkPriceRow::parse`].
    pub fn is_valid(&self) -> bool {
        !self.sku.trim().is_empty() && is_valid_price(self.price)
    }

    pub fn effective_reason(&self) -> &str {
        if self.reason.trim().is_empty() {
            DEFAULT_BULK_REASON
        } else {
            self.reason.trim()
        }
    }
}

/// Any finite number is accepted, including negative adjustments.
fn is_valid_price(price: f64) -> bool {
    price.is_finite()
}

fn parse_price(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|p| is_valid_price(*p))
}

/// Why a payload line was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    BlankSku,
    InvalidPrice(String),
    Malformed(String),
}

impl core::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SkipReason::BlankSku => f.write_str("blank sku"),
            SkipReason::InvalidPrice(text) => write!(f, "invalid price '{text}'"),
            SkipReason::Malformed(msg) => write!(f, "malformed line: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the payload.
    pub line: u64,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkParseReport {
    pub rows: Vec<BulkPriceRow>,
    pub skipped: Vec<SkippedLine>,
}

/// Parser for the bulk price-update payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvBulkParser;

impl CsvBulkParser {
    /// Valid rows only, in payload order.
    pub fn parse(raw: &str) -> Vec<BulkPriceRow> {
        Self::parse_report(raw).rows
    }

    /// Valid rows plus the line number and reason of every dropped line.
    ///
    /// Each line is read on its own, so a bad line never affects its
    /// neighbours. Quotes are not special. Blank lines produce neither a row
    /// nor a skip entry. Columns past the third are ignored.
    pub fn parse_report(raw: &str) -> BulkParseReport {
        let mut report = BulkParseReport::default();

        for (idx, text) in raw.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let line = idx as u64 + 1;

            let parsed = read_line(text).and_then(|fields| {
                BulkPriceRow::parse(
                    fields.get(0).unwrap_or(""),
                    fields.get(1).unwrap_or(""),
                    fields.get(2).unwrap_or(""),
                )
            });

            match parsed {
                Ok(row) => report.rows.push(row),
                Err(reason) => {
                    tracing::debug!(line, %reason, "bulk payload line dropped");
                    report.skipped.push(SkippedLine { line, reason });
                }
            }
        }

        report
    }

    pub fn sample_template() -> &'static str {
        SAMPLE_TEMPLATE
    }
}

fn read_line(text: &str) -> Result<csv::StringRecord, SkipReason> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(_) => Ok(record),
        Err(err) => Err(SkipReason::Malformed(err.to_string())),
    }
}
