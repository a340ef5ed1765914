//! Common test utilities and helpers

use std::fs;
use std::path::Path;
use std::sync::Arc;

use nifty_dashboard::data::load_datasets;
use nifty_dashboard::models::{Config, DatasetPaths, Datasets};
use tempfile::TempDir;

/// CSV fixtures shaped like the real Nifty 50 exports
pub mod fixtures {
    pub const DESCRIPTION_CSV: &str = "\
company_Name,Description,Face_Value,Stock_PE,ROE(%),ROCE(%),Market_Capital(Cr.),Dividend_Yield(%)
Alpha Corp,Alpha Corp makes alpha things.,10,25.3,18.2,21.0,150000,1.2
Beta Ltd,\"Beta Ltd builds bridges, roads and ports.\",2,14.8,11.5,13.9,82000,0.8
Gamma Industries,Gamma Industries refines gamma.,1,,9.4,10.1,41000,
";

    pub const QUARTERS_CSV: &str = "\
company_Name,Quarter,Sales,Expenses,Net Profit
Alpha Corp,Jun 2022,100,80,15
Beta Ltd,Jun 2022,50,45,3.5
Alpha Corp,Sep 2022,120,90,22.10
";

    pub const PROFIT_LOSS_CSV: &str = "\
company_Name,Year,Sales,Net Profit,EPS in Rs
Alpha Corp,Mar 2022,400,60,12.5
Alpha Corp,Mar 2023,460,75,15.0
Beta Ltd,Mar 2023,210,18,4.1
";

    pub const SHAREHOLDERS_CSV: &str = "\
company_Name,Holder,Mar 2022,Mar 2023
Alpha Corp,Promoters,51.20,51.20
Alpha Corp,FIIs,22.1,23.4
Alpha Corp,Public,26.7,25.4
";

    pub const PRICE_CSV: &str = "\
Company_Name,Date,Open,High,Low,Close,Volume
Alpha Corp,2022-03-01,99,101,98,100,120000
Alpha Corp,2022-03-02,100,103,99.5,102,95000
Alpha Corp,2022-03-03,102,102.5,98,99,143000
Beta Ltd,2022-03-01,40,41,39.5,40.5,300000
";
}

/// A data directory with all five files, removed on drop
pub struct TestDataDir {
    pub dir: TempDir,
}

impl TestDataDir {
    /// Write the standard fixtures
    pub fn new() -> Self {
        Self::with_files(&[
            (DatasetPaths::DESCRIPTION_FILE, fixtures::DESCRIPTION_CSV),
            (DatasetPaths::QUARTERS_FILE, fixtures::QUARTERS_CSV),
            (DatasetPaths::PROFIT_LOSS_FILE, fixtures::PROFIT_LOSS_CSV),
            (DatasetPaths::SHAREHOLDERS_FILE, fixtures::SHAREHOLDERS_CSV),
            (DatasetPaths::PRICE_FILE, fixtures::PRICE_CSV),
        ])
    }

    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for (name, contents) in files {
            write_file(dir.path(), name, contents);
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        Config::with_data_dir(self.path())
    }

    pub fn load(&self) -> Arc<Datasets> {
        Arc::new(load_datasets(&self.config()).expect("Failed to load fixture datasets"))
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write fixture file");
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::info;

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            // test_log may already have installed a subscriber
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("nifty_dashboard=debug,test=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }
}
