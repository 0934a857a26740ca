//! SVG chart rendering for the dashboard account panel.

use crate::domain::account::AccountSnapshot;
use crate::domain::pricing::format_money;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 220.0;
const PADDING: f64 = 40.0;
const BAR_GAP: f64 = 30.0;

const POSITIVE: &str = "#9333ea";
const NEGATIVE: &str = "#dc2626";

/// Bar chart of starting balance, profit and current balance.
pub fn account_chart_svg(snapshot: &AccountSnapshot) -> String {
    let bars = [
        ("Starting", snapshot.starting_balance()),
        ("Profit", snapshot.profit),
        ("Balance", snapshot.balance),
    ];

    let max_value = bars
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let bar_width = (plot_width - BAR_GAP * (bars.len() - 1) as f64) / bars.len() as f64;
    let scale_y = if max_value > 0.0 {
        plot_height / max_value
    } else {
        0.0
    };
    let baseline = HEIGHT - PADDING;

    let mut svg = format!(
        r#"<svg class="account-chart" xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(&format!(
        r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#6d28d9" stroke-width="1"/>"##,
        x1 = PADDING,
        x2 = WIDTH - PADDING,
        y = baseline
    ));

    for (i, (label, value)) in bars.iter().enumerate() {
        let x = PADDING + i as f64 * (bar_width + BAR_GAP);
        let bar_height = value.abs() * scale_y;
        let y = baseline - bar_height;
        let fill = if *value < 0.0 { NEGATIVE } else { POSITIVE };
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="{fill}"><title>{label}: {amount}</title></rect>"#,
            amount = format_money(*value)
        ));
        svg.push_str(&format!(
            r#"<text x="{cx:.1}" y="{ty:.1}" text-anchor="middle" fill="white" font-size="12">{label}</text>"#,
            cx = x + bar_width / 2.0,
            ty = baseline + 16.0
        ));
    }

    svg.push_str("</svg>");
    svg
}
