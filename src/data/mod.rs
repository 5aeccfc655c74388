mod file;
mod mock;

pub use file::JsonFileDataProvider;
pub use mock::StaticDataProvider;

use crate::cli::Args;
use crate::models::snapshot::{ BusinessSnapshot, EmployeeData, FinancialData, RevenueTrend };
use log::info;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse data file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only source of the current business metrics.
pub trait DataProvider: Send + Sync {
    fn financial_data(&self) -> Result<FinancialData, DataError>;

    fn revenue_trend_data(&self) -> Result<RevenueTrend, DataError>;

    fn employee_data(&self) -> Result<EmployeeData, DataError>;

    fn ceo_summary(&self) -> Result<String, DataError>;

    fn snapshot(&self) -> Result<BusinessSnapshot, DataError> {
        Ok(BusinessSnapshot {
            financial: self.financial_data()?,
            employees: self.employee_data()?,
            revenue_trend: self.revenue_trend_data()?,
            ceo_summary: self.ceo_summary()?,
        })
    }
}

pub fn create_data_provider(args: &Args) -> Arc<dyn DataProvider> {
    match &args.data_path {
        Some(path) if !path.trim().is_empty() => {
            info!("Business data will be read from: {}", path);
            Arc::new(JsonFileDataProvider::new(path))
        }
        _ => {
            info!("Business data: built-in demonstration dataset");
            Arc::new(StaticDataProvider::default())
        }
    }
}
