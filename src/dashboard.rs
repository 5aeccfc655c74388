//! Plain-text rendering of the business snapshot for terminal output.

use crate::config::lang::{ texts, Language };
use crate::models::snapshot::BusinessSnapshot;
use std::fmt::Write;

const BAR_WIDTH: f64 = 30.0;

fn money(value: f64, lang: Language) -> String {
    format!("{} {}", value, texts(lang).millions_unit)
}

/// Scales `value` against `max` into a row of block characters.
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let width = ((value / max) * BAR_WIDTH).round() as usize;
    "█".repeat(width.max(1))
}

/// Percentage of `total`, zero when there is no headcount.
fn share(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64) * 100.0 / (total as f64)
}

pub fn render(snapshot: &BusinessSnapshot, lang: Language) -> String {
    let t = texts(lang);
    let f = &snapshot.financial;
    let e = &snapshot.employees;
    let mut out = String::new();

    let _ = writeln!(out, "{}", t.dashboard_title);
    let _ = writeln!(out, "{}\n", t.dashboard_caption);

    let _ = writeln!(out, "== {} ==", t.financial_overview);
    let _ = writeln!(out, "  {}: {}", t.revenue_label, money(f.revenue, lang));
    let _ = writeln!(out, "  {}: {}", t.profit_margin_label, f.profit_margin);
    let _ = writeln!(out, "  {}: {}", t.expenses_label, money(f.expenses, lang));
    let _ = writeln!(out, "  {}: {}", t.profit_label, money(f.profit, lang));
    let _ = writeln!(out);

    let _ = writeln!(out, "-- {} --", t.revenue_vs_expenses);
    let top = f.revenue.max(f.expenses);
    let _ = writeln!(out, "  {:<12} {}", t.revenue_label, bar(f.revenue, top));
    let _ = writeln!(out, "  {:<12} {}\n", t.expenses_label, bar(f.expenses, top));

    let _ = writeln!(out, "== {} ==", t.revenue_trend);
    let peak = snapshot.revenue_trend
        .points()
        .iter()
        .map(|p| p.revenue)
        .fold(0.0_f64, f64::max);
    for point in snapshot.revenue_trend.points() {
        let _ = writeln!(out, "  {:<6} {:>8} {}", point.month, point.revenue, bar(point.revenue, peak));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "== {} ==", t.workforce_overview);
    let _ = writeln!(out, "  {}: {}", t.total_employees_label, e.total_employees);
    let _ = writeln!(out, "  {}: {}", t.active_employees_label, e.active_employees);
    let _ = writeln!(out, "  {}: {}", t.inactive_employees_label, e.inactive_employees());
    let _ = writeln!(out, "  {}: {}", t.attrition_label, e.attrition_rate);
    let _ = writeln!(out, "  {}: {}", t.engagement_label, e.engagement_score);
    let _ = writeln!(out, "  {}: {}\n", t.tenure_label, e.avg_tenure);

    let _ = writeln!(out, "-- {} --", t.active_inactive);
    let total = e.total_employees as f64;
    let _ = writeln!(
        out,
        "  {:<12} {:>5.1}% {}",
        t.active_employees_label,
        share(e.active_employees, e.total_employees),
        bar(e.active_employees as f64, total)
    );
    let _ = writeln!(
        out,
        "  {:<12} {:>5.1}% {}\n",
        t.inactive_employees_label,
        share(e.inactive_employees(), e.total_employees),
        bar(e.inactive_employees() as f64, total)
    );

    let _ = writeln!(out, "== {} ==", t.ceo_insight);
    let _ = writeln!(out, "  {}\n", snapshot.ceo_summary);
    let _ = write!(out, "{}", t.footer);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ DataProvider, StaticDataProvider };

    #[test]
    fn test_render_shows_all_sections() {
        let snapshot = StaticDataProvider::default().snapshot().unwrap();
        let text = render(&snapshot, Language::English);

        assert!(text.contains("== Financial Overview =="));
        assert!(text.contains("Revenue: 120.5 M QAR"));
        assert!(text.contains("Inactive: 70"));
        assert!(text.contains("Jun"));
        assert!(text.contains(&snapshot.ceo_summary));
    }

    #[test]
    fn test_render_localizes_labels() {
        let snapshot = StaticDataProvider::default().snapshot().unwrap();
        let text = render(&snapshot, Language::Arabic);
        assert!(text.contains(texts(Language::Arabic).workforce_overview));
        assert!(text.contains("مليون ريال"));
    }

    #[test]
    fn test_render_draws_titled_charts() {
        let snapshot = StaticDataProvider::default().snapshot().unwrap();
        let text = render(&snapshot, Language::English);

        assert!(text.contains("-- Revenue vs Expenses --"));
        assert!(text.contains("-- Active vs Inactive Employees --"));
        // 1180 of 1250 active, 70 inactive.
        assert!(text.contains(" 94.4% "));
        assert!(text.contains("  5.6% "));

        let arabic = render(&snapshot, Language::Arabic);
        assert!(arabic.contains(texts(Language::Arabic).active_inactive));
        assert!(arabic.contains(texts(Language::Arabic).revenue_vs_expenses));
    }

    #[test]
    fn test_share_handles_empty_headcount() {
        assert_eq!(share(5, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
    }

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10.0, 10.0).chars().count(), 30);
        assert_eq!(bar(5.0, 10.0).chars().count(), 15);
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(0.01, 10.0).chars().count(), 1);
    }
}
