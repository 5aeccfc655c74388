use crate::config::lang::Language;
use crate::models::snapshot::BusinessSnapshot;

const EXECUTIVE_ASSISTANT_TEMPLATE: &str =
    "You are a CEO Executive Assistant.

Analyze company data and provide:
- Clear insights
- Risks & alerts
- Actionable recommendations

Respond in {language}.

Financial Data: {financial}
Employee Data: {employees}
Revenue Trend: {revenue_trend}";

/// Builds the system instruction from the snapshot metrics and the answer
/// language. Output depends only on the arguments.
///
/// `ceo_summary` is dashboard copy and is never sent to the model.
pub fn get_executive_system_prompt(snapshot: &BusinessSnapshot, lang: Language) -> String {
    EXECUTIVE_ASSISTANT_TEMPLATE.replace("{language}", lang.name())
        .replace("{financial}", &snapshot.financial.to_string())
        .replace("{employees}", &snapshot.employees.to_string())
        .replace("{revenue_trend}", &snapshot.revenue_trend.to_string())
}
