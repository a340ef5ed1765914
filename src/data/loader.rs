use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::data::error::{DatasetError, DatasetResult};
use crate::models::{
    CellValue, CompanyProfile, CompanyTable, Config, DatasetPaths, Datasets, PriceRecord,
    PriceSeries, Record, TableKind,
};

/// Key column of the description, quarterly, profit/loss and shareholding files
pub const COMPANY_KEY: &str = "company_Name";
/// Key column of the price file
pub const PRICE_COMPANY_KEY: &str = "Company_Name";

const DESCRIPTION_COLUMN: &str = "Description";
const FACE_VALUE_COLUMN: &str = "Face_Value";
const STOCK_PE_COLUMN: &str = "Stock_PE";
const ROE_COLUMN: &str = "ROE(%)";
const ROCE_COLUMN: &str = "ROCE(%)";
const MARKET_CAP_COLUMN: &str = "Market_Capital(Cr.)";
const DIVIDEND_YIELD_COLUMN: &str = "Dividend_Yield(%)";

const PRICE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Reads the five source tables once and partitions them by company
pub struct DatasetLoader {
    paths: DatasetPaths,
}

impl DatasetLoader {
    pub fn new(paths: DatasetPaths) -> Self {
        Self { paths }
    }

    /// Load every table; the first failure aborts the whole load
    pub fn load(&self) -> DatasetResult<Datasets> {
        let (profiles, company_names) = read_profiles(
            open_file(&self.paths.description)?,
            &self.paths.description,
        )?;
        info!(
            "📋 Loaded {} company profiles from {}",
            profiles.len(),
            self.paths.description.display()
        );

        let quarterly = self.load_table(&self.paths.quarters, TableKind::Quarterly)?;
        let profit_loss = self.load_table(&self.paths.profit_loss, TableKind::ProfitLoss)?;
        let shareholding = self.load_table(&self.paths.shareholders, TableKind::Shareholding)?;

        let prices = read_prices(open_file(&self.paths.price)?, &self.paths.price)?;
        info!(
            "📈 Loaded {} price records for {} companies from {}",
            prices.record_count(),
            prices.company_count(),
            self.paths.price.display()
        );
        for company in prices.out_of_order_companies() {
            warn!("Price series for '{}' is not in date order", company);
        }

        Ok(Datasets {
            profiles,
            company_names,
            quarterly,
            profit_loss,
            shareholding,
            prices,
        })
    }

    fn load_table(&self, path: &Path, kind: TableKind) -> DatasetResult<CompanyTable> {
        let table = read_company_table(open_file(path)?, path, kind)?;
        info!(
            "📊 Loaded {} {} rows for {} companies from {}",
            table.row_count(),
            kind,
            table.company_count(),
            path.display()
        );
        Ok(table)
    }
}

/// Load all datasets named by the configuration
pub fn load_datasets(config: &Config) -> DatasetResult<Datasets> {
    DatasetLoader::new(config.paths.clone()).load()
}

fn open_file(path: &Path) -> DatasetResult<File> {
    if !path.exists() {
        return Err(DatasetError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new().has_headers(true).from_reader(source)
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, path: &Path) -> DatasetResult<StringRecord> {
    reader
        .headers()
        .map(|headers| headers.clone())
        .map_err(|source| csv_error(path, source))
}

fn csv_error(path: &Path, source: csv::Error) -> DatasetError {
    DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Find a column by exact name, falling back to an ASCII case-insensitive match
fn resolve_column(headers: &StringRecord, column: &str, path: &Path) -> DatasetResult<usize> {
    let exact = headers.iter().position(|header| header.trim() == column);
    let resolved = exact.or_else(|| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(column))
    });

    match resolved {
        Some(index) => {
            if exact.is_none() {
                debug!(
                    "{}: resolved column '{}' as '{}'",
                    path.display(),
                    column,
                    &headers[index]
                );
            }
            Ok(index)
        }
        None => Err(DatasetError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        }),
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

fn company_key(record: &StringRecord, key_index: usize) -> String {
    record.get(key_index).unwrap_or_default().trim().to_string()
}

/// Read the description file into profiles plus the selector order
pub fn read_profiles<R: Read>(
    source: R,
    path: &Path,
) -> DatasetResult<(HashMap<String, CompanyProfile>, Vec<String>)> {
    let mut reader = csv_reader(source);
    let headers = read_headers(&mut reader, path)?;

    let key = resolve_column(&headers, COMPANY_KEY, path)?;
    let description = resolve_column(&headers, DESCRIPTION_COLUMN, path)?;
    let face_value = resolve_column(&headers, FACE_VALUE_COLUMN, path)?;
    let stock_pe = resolve_column(&headers, STOCK_PE_COLUMN, path)?;
    let roe = resolve_column(&headers, ROE_COLUMN, path)?;
    let roce = resolve_column(&headers, ROCE_COLUMN, path)?;
    let market_cap = resolve_column(&headers, MARKET_CAP_COLUMN, path)?;
    let dividend_yield = resolve_column(&headers, DIVIDEND_YIELD_COLUMN, path)?;

    let mut profiles = HashMap::new();
    let mut company_names = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result.map_err(|source| csv_error(path, source))?;
        let name = company_key(&record, key);
        let cell = |index: usize| CellValue::parse(record.get(index).unwrap_or_default());

        let profile = CompanyProfile {
            name: name.clone(),
            description: cell(description),
            face_value: cell(face_value),
            stock_pe: cell(stock_pe),
            roe_percent: cell(roe),
            roce_percent: cell(roce),
            market_cap_cr: cell(market_cap),
            dividend_yield_percent: cell(dividend_yield),
        };

        if seen.insert(name.clone()) {
            company_names.push(name.clone());
        } else {
            warn!(
                "{}: duplicate company '{}' at line {}, keeping the later row",
                path.display(),
                name,
                line_of(&record)
            );
        }
        profiles.insert(name, profile);
    }

    Ok((profiles, company_names))
}

/// Partition a per-company table on its key column, dropping the key
pub fn read_company_table<R: Read>(
    source: R,
    path: &Path,
    kind: TableKind,
) -> DatasetResult<CompanyTable> {
    let mut reader = csv_reader(source);
    let headers = read_headers(&mut reader, path)?;
    let key = resolve_column(&headers, COMPANY_KEY, path)?;
    debug!("{}: key column '{}' at index {}", path.display(), &headers[key], key);

    let mut table = CompanyTable::new(kind);
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(path, source))?;
        let row: Record = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(index, _)| *index != key)
            .map(|(_, (column, value))| (column, CellValue::parse(value)))
            .collect();
        table.push(company_key(&record, key), row);
    }

    Ok(table)
}

fn parse_number(record: &StringRecord, index: usize, column: &str, path: &Path) -> DatasetResult<f64> {
    let raw = record.get(index).unwrap_or_default();
    CellValue::parse(raw)
        .as_f64()
        .ok_or_else(|| DatasetError::InvalidValue {
            path: path.to_path_buf(),
            line: line_of(record),
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Parse a price date; a trailing time component is ignored
pub fn parse_price_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    PRICE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|datetime| datetime.date())
        })
}

/// Read the price file into per-company OHLCV series
pub fn read_prices<R: Read>(source: R, path: &Path) -> DatasetResult<PriceSeries> {
    let mut reader = csv_reader(source);
    let headers = read_headers(&mut reader, path)?;

    let key = resolve_column(&headers, PRICE_COMPANY_KEY, path)?;
    let date = resolve_column(&headers, "Date", path)?;
    let open = resolve_column(&headers, "Open", path)?;
    let high = resolve_column(&headers, "High", path)?;
    let low = resolve_column(&headers, "Low", path)?;
    let close = resolve_column(&headers, "Close", path)?;
    let volume = resolve_column(&headers, "Volume", path)?;

    let mut prices = PriceSeries::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(path, source))?;
        let raw_date = record.get(date).unwrap_or_default();
        let parsed_date = parse_price_date(raw_date).ok_or_else(|| DatasetError::InvalidValue {
            path: path.to_path_buf(),
            line: line_of(&record),
            column: "Date".to_string(),
            value: raw_date.to_string(),
        })?;

        let bar = PriceRecord {
            date: parsed_date,
            open: parse_number(&record, open, "Open", path)?,
            high: parse_number(&record, high, "High", path)?,
            low: parse_number(&record, low, "Low", path)?,
            close: parse_number(&record, close, "Close", path)?,
            volume: parse_number(&record, volume, "Volume", path)?,
        };
        prices.push(company_key(&record, key), bar);
    }

    Ok(prices)
}
