use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell from one of the company tables.
///
/// Surrounding whitespace is dropped from every cell. Numbers keep the text
/// they were parsed from so that rendering never reformats or rounds a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number { value: f64, text: String },
    Text(String),
    Empty,
}

impl CellValue {
    /// Classify a raw CSV cell
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Number {
                value,
                text: trimmed.to_string(),
            },
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number { text, .. } => f.write_str(text),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Empty => Ok(()),
        }
    }
}

/// One table row: column name to value, in source header order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    cells: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell, replacing the value if the column already exists
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        let column = column.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// Description and headline metrics for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub description: CellValue,
    pub face_value: CellValue,
    pub stock_pe: CellValue,
    pub roe_percent: CellValue,
    pub roce_percent: CellValue,
    pub market_cap_cr: CellValue,
    pub dividend_yield_percent: CellValue,
}

/// The three per-company financial tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Quarterly,
    ProfitLoss,
    Shareholding,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [
        TableKind::Quarterly,
        TableKind::ProfitLoss,
        TableKind::Shareholding,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            TableKind::Quarterly => "Quarterly Results",
            TableKind::ProfitLoss => "Profit & Loss",
            TableKind::Shareholding => "Shareholding Pattern",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            TableKind::Quarterly => "Consolidated Figures in Rs. Crores",
            TableKind::ProfitLoss => "For year march 2023\nConsolidated Figures in Rs. Crores",
            TableKind::Shareholding => "Numbers in percentages",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Company name to its rows for one table kind
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyTable {
    pub kind: TableKind,
    rows: HashMap<String, Vec<Record>>,
}

impl CompanyTable {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: HashMap::new(),
        }
    }

    pub fn push(&mut self, company: impl Into<String>, record: Record) {
        self.rows.entry(company.into()).or_default().push(record);
    }

    /// Rows for a company, `None` when the table has no data for it
    pub fn rows_for(&self, company: &str) -> Option<&[Record]> {
        self.rows.get(company).map(|rows| rows.as_slice())
    }

    pub fn contains(&self, company: &str) -> bool {
        self.rows.contains_key(company)
    }

    pub fn company_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRecord {
    /// Up-move when the close is at or above the open
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Company name to its daily bars in stored order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    series: HashMap<String, Vec<PriceRecord>>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, company: impl Into<String>, record: PriceRecord) {
        self.series.entry(company.into()).or_default().push(record);
    }

    pub fn series_for(&self, company: &str) -> Option<&[PriceRecord]> {
        self.series.get(company).map(|bars| bars.as_slice())
    }

    pub fn company_count(&self) -> usize {
        self.series.len()
    }

    pub fn record_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Companies whose dates go backwards somewhere in the series
    pub fn out_of_order_companies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .series
            .iter()
            .filter(|(_, bars)| bars.windows(2).any(|pair| pair[1].date < pair[0].date))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Everything loaded at startup; never mutated afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub profiles: HashMap<String, CompanyProfile>,
    /// Selector order: first appearance in the description file
    pub company_names: Vec<String>,
    pub quarterly: CompanyTable,
    pub profit_loss: CompanyTable,
    pub shareholding: CompanyTable,
    pub prices: PriceSeries,
}

impl Datasets {
    pub fn table(&self, kind: TableKind) -> &CompanyTable {
        match kind {
            TableKind::Quarterly => &self.quarterly,
            TableKind::ProfitLoss => &self.profit_loss,
            TableKind::Shareholding => &self.shareholding,
        }
    }

    pub fn profile(&self, company: &str) -> Option<&CompanyProfile> {
        self.profiles.get(company)
    }
}

/// The currently selected company
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Company(String),
}

impl Selection {
    pub fn company(name: impl Into<String>) -> Self {
        Selection::Company(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Company(name) => Some(name.as_str()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::None => f.write_str("no company selected"),
            Selection::Company(name) => f.write_str(name),
        }
    }
}

/// Locations of the five source files
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    pub description: PathBuf,
    pub quarters: PathBuf,
    pub profit_loss: PathBuf,
    pub shareholders: PathBuf,
    pub price: PathBuf,
}

impl DatasetPaths {
    pub const DESCRIPTION_FILE: &'static str = "Nifty50_Description.csv";
    pub const QUARTERS_FILE: &'static str = "Nifty50_Quarters.csv";
    pub const PROFIT_LOSS_FILE: &'static str = "Nifty50_ProfitLoss.csv";
    pub const SHAREHOLDERS_FILE: &'static str = "Nifty50_Shareholders.csv";
    pub const PRICE_FILE: &'static str = "Nifty50_Price.csv";

    /// Default file names inside one directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            description: dir.join(Self::DESCRIPTION_FILE),
            quarters: dir.join(Self::QUARTERS_FILE),
            profit_loss: dir.join(Self::PROFIT_LOSS_FILE),
            shareholders: dir.join(Self::SHAREHOLDERS_FILE),
            price: dir.join(Self::PRICE_FILE),
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub paths: DatasetPaths,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with_dir(None)
    }

    /// Like `from_env`, but `data_dir` (from the command line) replaces
    /// `NIFTY_DATA_DIR`. Per-file overrides still apply on top.
    pub fn from_env_with_dir(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|var| std::env::var(var).ok(), data_dir)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let data_dir = data_dir
            .or_else(|| lookup("NIFTY_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let mut paths = DatasetPaths::in_dir(&data_dir);
        let overrides = [
            ("NIFTY_DESCRIPTION_CSV", &mut paths.description),
            ("NIFTY_QUARTERS_CSV", &mut paths.quarters),
            ("NIFTY_PROFITLOSS_CSV", &mut paths.profit_loss),
            ("NIFTY_SHAREHOLDERS_CSV", &mut paths.shareholders),
            ("NIFTY_PRICE_CSV", &mut paths.price),
        ];
        for (var, path) in overrides {
            if let Some(value) = lookup(var) {
                if value.trim().is_empty() {
                    return Err(anyhow::anyhow!("{} is set but empty", var));
                }
                *path = PathBuf::from(value);
            }
        }

        Ok(Config { data_dir, paths })
    }

    /// Same file names, different directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            paths: DatasetPaths::in_dir(&data_dir),
            data_dir,
        }
    }
}
