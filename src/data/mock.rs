use super::{ DataError, DataProvider };
use crate::models::snapshot::{ EmployeeData, FinancialData, RevenueTrend, TrendPoint };

/// Fixed demonstration dataset.
#[derive(Debug, Clone)]
pub struct StaticDataProvider {
    financial: FinancialData,
    employees: EmployeeData,
    trend: RevenueTrend,
    summary: String,
}

impl StaticDataProvider {
    pub fn new(
        financial: FinancialData,
        employees: EmployeeData,
        trend: RevenueTrend,
        summary: impl Into<String>
    ) -> Self {
        Self { financial, employees, trend, summary: summary.into() }
    }
}

impl Default for StaticDataProvider {
    fn default() -> Self {
        let trend = [
            ("Jan", 18.2),
            ("Feb", 19.5),
            ("Mar", 20.1),
            ("Apr", 19.8),
            ("May", 21.4),
            ("Jun", 21.5),
        ]
            .iter()
            .map(|(month, revenue)| TrendPoint { month: month.to_string(), revenue: *revenue })
            .collect();

        Self::new(
            FinancialData {
                revenue: 120.5,
                expenses: 85.2,
                profit: 35.3,
                profit_margin: 29.3,
            },
            EmployeeData {
                total_employees: 1250,
                active_employees: 1180,
                attrition_rate: 6.8,
                engagement_score: 78.5,
                avg_tenure: 4.2,
            },
            RevenueTrend(trend),
            "Revenue grew steadily through the first half with a healthy 29.3% margin. \
             Attrition is within target, but engagement dipped slightly in Q2 and \
             operating expenses are rising faster than revenue."
        )
    }
}

impl DataProvider for StaticDataProvider {
    fn financial_data(&self) -> Result<FinancialData, DataError> {
        Ok(self.financial.clone())
    }

    fn revenue_trend_data(&self) -> Result<RevenueTrend, DataError> {
        Ok(self.trend.clone())
    }

    fn employee_data(&self) -> Result<EmployeeData, DataError> {
        Ok(self.employees.clone())
    }

    fn ceo_summary(&self) -> Result<String, DataError> {
        Ok(self.summary.clone())
    }
}
