use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{PriceRecord, PriceSeries, Selection};

pub const INCREASING_COLOR: &str = "green";
pub const DECREASING_COLOR: &str = "red";
pub const VOLUME_COLOR: &str = "rgba(0, 0, 255, 0.5)";

/// Declarative chart payload handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Empty,
    Line(LineChartSpec),
    Candlestick(CandlestickSpec),
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartSpec::Empty)
    }

    pub fn as_line(&self) -> Option<&LineChartSpec> {
        match self {
            ChartSpec::Line(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_candlestick(&self) -> Option<&CandlestickSpec> {
        match self {
            ChartSpec::Candlestick(spec) => Some(spec),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: LineSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

impl From<&PriceRecord> for Candle {
    fn from(bar: &PriceRecord) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBar {
    pub date: NaiveDate,
    pub volume: f64,
}

/// Two panels sharing the date axis: candles on top, volume below
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickSpec {
    pub title: String,
    pub volume_title: String,
    pub shared_x: bool,
    pub range_slider: bool,
    pub increasing_color: String,
    pub decreasing_color: String,
    pub volume_color: String,
    pub candles: Vec<Candle>,
    pub volume: Vec<VolumeBar>,
}

impl CandlestickSpec {
    /// Lowest low and highest high across all candles
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let low = self.candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high = self.candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        (low.is_finite() && high.is_finite()).then_some((low, high))
    }

    pub fn max_volume(&self) -> f64 {
        self.volume.iter().map(|bar| bar.volume).fold(0.0, f64::max)
    }
}

fn selected_series<'a>(selection: &Selection, prices: &'a PriceSeries) -> Option<(&'a [PriceRecord], String)> {
    let name = selection.name()?;
    prices.series_for(name).map(|bars| (bars, name.to_string()))
}

pub fn bind_price_line(selection: &Selection, prices: &PriceSeries) -> ChartSpec {
    let Some((bars, name)) = selected_series(selection, prices) else {
        return ChartSpec::Empty;
    };

    ChartSpec::Line(LineChartSpec {
        title: format!("Stock Prices for {}", name),
        x_label: "Date".to_string(),
        y_label: "Stock Price (Close)".to_string(),
        series: LineSeries {
            name: "Close".to_string(),
            x: bars.iter().map(|bar| bar.date).collect(),
            y: bars.iter().map(|bar| bar.close).collect(),
        },
    })
}

pub fn bind_candlestick(selection: &Selection, prices: &PriceSeries) -> ChartSpec {
    let Some((bars, name)) = selected_series(selection, prices) else {
        return ChartSpec::Empty;
    };

    ChartSpec::Candlestick(CandlestickSpec {
        title: format!("Candlestick Chart for {}", name),
        volume_title: "Volume".to_string(),
        shared_x: true,
        range_slider: false,
        increasing_color: INCREASING_COLOR.to_string(),
        decreasing_color: DECREASING_COLOR.to_string(),
        volume_color: VOLUME_COLOR.to_string(),
        candles: bars.iter().map(Candle::from).collect(),
        volume: bars
            .iter()
            .map(|bar| VolumeBar {
                date: bar.date,
                volume: bar.volume,
            })
            .collect(),
    })
}
