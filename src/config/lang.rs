use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

pub const LANGUAGES: [Language; 2] = [Language::English, Language::Arabic];

impl Language {
    /// Name used when asking the model which language to answer in.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseLanguageError {
    message: String,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "arabic" | "ar" | "العربية" => Ok(Language::Arabic),
            _ =>
                Err(ParseLanguageError {
                    message: format!("Unsupported language: '{}'", s),
                }),
        }
    }
}

/// UI strings for one display language.
#[derive(Debug, Serialize)]
pub struct Texts {
    pub dashboard_title: &'static str,
    pub dashboard_caption: &'static str,
    pub financial_overview: &'static str,
    pub revenue_label: &'static str,
    pub expenses_label: &'static str,
    pub profit_label: &'static str,
    pub profit_margin_label: &'static str,
    pub millions_unit: &'static str,
    pub revenue_vs_expenses: &'static str,
    pub revenue_trend: &'static str,
    pub workforce_overview: &'static str,
    pub total_employees_label: &'static str,
    pub active_employees_label: &'static str,
    pub inactive_employees_label: &'static str,
    pub active_inactive: &'static str,
    pub attrition_label: &'static str,
    pub engagement_label: &'static str,
    pub tenure_label: &'static str,
    pub ceo_insight: &'static str,
    pub ai_title: &'static str,
    pub ai_caption: &'static str,
    pub quick_questions_title: &'static str,
    pub quick_questions: [&'static str; 4],
    pub clear_chat: &'static str,
    pub chat_input: &'static str,
    pub analyzing: &'static str,
    pub footer: &'static str,
}

static ENGLISH: Texts = Texts {
    dashboard_title: "CEO Analytic Dashboard",
    dashboard_caption: "Executive overview of financial performance and workforce health",
    financial_overview: "Financial Overview",
    revenue_label: "Revenue",
    expenses_label: "Expenses",
    profit_label: "Profit",
    profit_margin_label: "Profit Margin %",
    millions_unit: "M QAR",
    revenue_vs_expenses: "Revenue vs Expenses",
    revenue_trend: "Revenue Trend",
    workforce_overview: "Workforce Overview",
    total_employees_label: "Total Employees",
    active_employees_label: "Active",
    inactive_employees_label: "Inactive",
    active_inactive: "Active vs Inactive Employees",
    attrition_label: "Attrition Rate %",
    engagement_label: "Engagement Score",
    tenure_label: "Avg Tenure",
    ceo_insight: "CEO Insight",
    ai_title: "AI Executive Assistant",
    ai_caption: "Ask questions about company performance",
    quick_questions_title: "Quick Questions",
    quick_questions: [
        "Summarize our financial performance",
        "What are the key risks right now?",
        "How healthy is our workforce?",
        "What should we prioritize next quarter?",
    ],
    clear_chat: "Clear Chat",
    chat_input: "Ask the AI assistant...",
    analyzing: "Analyzing...",
    footer: "Data shown is for demonstration purposes",
};

static ARABIC: Texts = Texts {
    dashboard_title: "لوحة تحليلات الرئيس التنفيذي",
    dashboard_caption: "نظرة تنفيذية على الأداء المالي وصحة القوى العاملة",
    financial_overview: "نظرة مالية عامة",
    revenue_label: "الإيرادات",
    expenses_label: "المصروفات",
    profit_label: "الربح",
    profit_margin_label: "هامش الربح %",
    millions_unit: "مليون ريال",
    revenue_vs_expenses: "الإيرادات مقابل المصروفات",
    revenue_trend: "اتجاه الإيرادات",
    workforce_overview: "نظرة على القوى العاملة",
    total_employees_label: "إجمالي الموظفين",
    active_employees_label: "نشط",
    inactive_employees_label: "غير نشط",
    active_inactive: "الموظفون النشطون وغير النشطين",
    attrition_label: "معدل الدوران %",
    engagement_label: "مؤشر المشاركة",
    tenure_label: "متوسط مدة الخدمة",
    ceo_insight: "رؤية الرئيس التنفيذي",
    ai_title: "المساعد التنفيذي الذكي",
    ai_caption: "اطرح أسئلة حول أداء الشركة",
    quick_questions_title: "أسئلة سريعة",
    quick_questions: [
        "لخص أداءنا المالي",
        "ما هي المخاطر الرئيسية حالياً؟",
        "ما مدى صحة القوى العاملة لدينا؟",
        "ما الذي يجب أن نعطيه الأولوية في الربع القادم؟",
    ],
    clear_chat: "مسح المحادثة",
    chat_input: "اسأل المساعد الذكي...",
    analyzing: "جارٍ التحليل...",
    footer: "البيانات المعروضة لأغراض العرض التوضيحي",
};

pub fn texts(lang: Language) -> &'static Texts {
    match lang {
        Language::English => &ENGLISH,
        Language::Arabic => &ARABIC,
    }
}
