use crate::domain::{Analysis, BestMonth, DuplicatePolicy, Period};
use crate::models::TrendModel;
use crate::store::SeriesStats;

/// Format a sales amount, always showing a decimal part (`300.0`, `312.75`).
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn format_prediction(period: Period, prediction: f64) -> String {
    format!("Predicted sales for {period}: {prediction:.2}")
}

pub fn format_sales_for_month(period: Period, sales: Option<f64>) -> String {
    match sales {
        Some(v) => format!("Sales for {period}: {}", format_amount(v)),
        None => format!("Data Not Available for {period}"),
    }
}

pub fn format_analysis(analysis: &Analysis) -> String {
    analysis.category.description().to_string()
}

pub fn format_best_month(year: i32, best: Option<BestMonth>) -> String {
    match best {
        Some(b) => format!(
            "The best sales month in the year {year} is: {} with sales amounting to ${}",
            b.period,
            format_amount(b.value)
        ),
        None => format!("No sales data available for the year {year}"),
    }
}

/// Format the dataset summary (series stats + trend diagnostics).
pub fn format_summary(
    stats: Option<&SeriesStats>,
    trend: Option<&TrendModel>,
    policy: DuplicatePolicy,
) -> String {
    let mut out = String::new();

    out.push_str("=== sales - Monthly Sales Trend ===\n");
    out.push_str(&format!("Duplicates: {policy:?}\n"));

    let Some(stats) = stats else {
        out.push_str("Observations: none\n");
        return out;
    };

    out.push_str(&format!(
        "Observations: n={} | with sales={} | periods=[{}, {}]\n",
        stats.observations, stats.valued, stats.first_period, stats.last_period
    ));
    if let (Some(lo), Some(hi)) = (stats.min_value, stats.max_value) {
        out.push_str(&format!("Sales range: [{lo:.2}, {hi:.2}]\n"));
    }

    match trend {
        Some(model) => {
            let q = model.quality();
            out.push_str("\nTrend (OLS on year + month/12):\n");
            out.push_str(&format!("  slope: {:+.2} per year\n", model.slope_per_year()));
            out.push_str(&format!(
                "  level: {:.2} at x={:.4}\n",
                model.intercept(),
                model.x_mean()
            ));
            let r2 = q
                .r_squared
                .map(|r| format!("{r:.4}"))
                .unwrap_or_else(|| "n/a".to_string());
            out.push_str(&format!("  n={} | RMSE={:.2} | R²={r2}\n", q.n, q.rmse));
        }
        None => out.push_str("\nTrend: not available (no recorded sales)\n"),
    }

    out
}
