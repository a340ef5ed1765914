use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CompanyProfile, Selection};

pub const DESCRIPTION_PLACEHOLDER: &str = "Please select a company";
pub const METRICS_PLACEHOLDER: &str = "";

/// The two text regions: company description and key metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyText {
    pub description: String,
    pub metrics: String,
}

impl CompanyText {
    pub fn placeholder() -> Self {
        Self {
            description: DESCRIPTION_PLACEHOLDER.to_string(),
            metrics: METRICS_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.description == DESCRIPTION_PLACEHOLDER && self.metrics == METRICS_PLACEHOLDER
    }
}

/// Labelled metric lines, values exactly as loaded
pub fn metric_lines(profile: &CompanyProfile) -> Vec<(&'static str, String)> {
    vec![
        ("Face Value", profile.face_value.to_string()),
        ("Stock P/E", profile.stock_pe.to_string()),
        ("ROE%", profile.roe_percent.to_string()),
        ("ROCE%", profile.roce_percent.to_string()),
        ("Market Cap", profile.market_cap_cr.to_string()),
        ("Dividend Yield%", profile.dividend_yield_percent.to_string()),
    ]
}

pub fn bind_company_text(
    selection: &Selection,
    profiles: &HashMap<String, CompanyProfile>,
) -> CompanyText {
    let Some(profile) = selection.name().and_then(|name| profiles.get(name)) else {
        return CompanyText::placeholder();
    };

    let metrics = metric_lines(profile)
        .into_iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n");

    CompanyText {
        description: format!("{}:\n{}", profile.name, profile.description),
        metrics,
    }
}
