use serde::{ Deserialize, Serialize };
use std::fmt;

/// Financial metrics in millions of QAR, except `profit_margin` which is a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub profit_margin: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeData {
    pub total_employees: u32,
    pub active_employees: u32,
    pub attrition_rate: f64,
    pub engagement_score: f64,
    pub avg_tenure: f64,
}

impl EmployeeData {
    pub fn inactive_employees(&self) -> u32 {
        self.total_employees.saturating_sub(self.active_employees)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub revenue: f64,
}

/// Revenue by period, in the order the provider reported it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevenueTrend(pub Vec<TrendPoint>);

impl RevenueTrend {
    pub fn points(&self) -> &[TrendPoint] {
        &self.0
    }
}

/// Point-in-time copy of every metric group handed to the assistant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessSnapshot {
    pub financial: FinancialData,
    pub employees: EmployeeData,
    pub revenue_trend: RevenueTrend,
    pub ceo_summary: String,
}

impl fmt::Display for FinancialData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{revenue: {}, expenses: {}, profit: {}, profit_margin: {}}}",
            self.revenue,
            self.expenses,
            self.profit,
            self.profit_margin
        )
    }
}

impl fmt::Display for EmployeeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{total_employees: {}, active_employees: {}, attrition_rate: {}, engagement_score: {}, avg_tenure: {}}}",
            self.total_employees,
            self.active_employees,
            self.attrition_rate,
            self.engagement_score,
            self.avg_tenure
        )
    }
}

impl fmt::Display for RevenueTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.0
            .iter()
            .map(|p| format!("{}: {}", p.month, p.revenue))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{}}}", entries)
    }
}
