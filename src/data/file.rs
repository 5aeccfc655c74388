use super::{ DataError, DataProvider };
use crate::models::snapshot::{ BusinessSnapshot, EmployeeData, FinancialData, RevenueTrend };
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Reads a full `BusinessSnapshot` JSON document from disk on every call,
/// so edits to the file show up on the next question.
#[derive(Debug, Clone)]
pub struct JsonFileDataProvider {
    path: PathBuf,
}

impl JsonFileDataProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BusinessSnapshot, DataError> {
        let display = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: display.clone(),
            source,
        })?;
        debug!("Loaded {} bytes of business data from {}", content.len(), display);
        serde_json::from_str(&content).map_err(|source| DataError::Parse { path: display, source })
    }
}

impl DataProvider for JsonFileDataProvider {
    fn financial_data(&self) -> Result<FinancialData, DataError> {
        Ok(self.load()?.financial)
    }

    fn revenue_trend_data(&self) -> Result<RevenueTrend, DataError> {
        Ok(self.load()?.revenue_trend)
    }

    fn employee_data(&self) -> Result<EmployeeData, DataError> {
        Ok(self.load()?.employees)
    }

    fn ceo_summary(&self) -> Result<String, DataError> {
        Ok(self.load()?.ceo_summary)
    }

    fn snapshot(&self) -> Result<BusinessSnapshot, DataError> {
        self.load()
    }
}
