//! Inline SVG chart builders. Pure string functions over the projections,
//! so the page layer stays assembly-only and tests need no renderer.

use crate::aggregate::{CategoryTotal, MonthRow, TypeTotal};
use crate::fmt::{format_k, money, y_axis_ticks};
use crate::models::TxnKind;

pub const INCOME_COLOR: &str = "#3fb950";
pub const EXPENSE_COLOR: &str = "#e5534b";

/// Slice colors for the category pie, cycled when there are more
/// categories than entries.
const PALETTE: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

fn kind_color(kind: TxnKind) -> &'static str {
    match kind {
        TxnKind::Income => INCOME_COLOR,
        TxnKind::Expense => EXPENSE_COLOR,
    }
}

/// Vertical bar chart of the per-type sums.
pub fn type_bar_svg(by_type: &[TypeTotal]) -> String {
    if by_type.is_empty() {
        return String::new();
    }

    let width = 480.0;
    let height = 280.0;
    let (ml, mr, mt, mb) = (60.0, 16.0, 24.0, 36.0);
    let plot_w = width - ml - mr;
    let plot_h = height - mt - mb;

    let max_val = by_type.iter().map(|t| t.total).fold(0.0_f64, f64::max);
    let (top, mid) = y_axis_ticks(max_val.max(1.0));

    let mut svg = svg_open(width, height);
    svg.push_str(&grid_lines(ml, mt, plot_w, plot_h, top, mid));

    let slot = plot_w / by_type.len() as f64;
    let bar_w = slot * 0.5;
    for (i, t) in by_type.iter().enumerate() {
        let h = (t.total / top) * plot_h;
        let x = ml + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = mt + plot_h - h;
        svg.push_str(&format!(
            r##"<rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{}" rx="2"/>"##,
            kind_color(t.kind)
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="#444">{}</text>"##,
            x + bar_w / 2.0,
            y - 6.0,
            money(t.total)
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="#222">{}</text>"##,
            x + bar_w / 2.0,
            mt + plot_h + 18.0,
            t.kind
        ));
    }

    svg.push_str("</g></svg>");
    svg
}

/// Pie chart of expense categories with a legend carrying amounts and
/// percentage shares.
pub fn category_pie_svg(by_category: &[CategoryTotal]) -> String {
    let total: f64 = by_category.iter().map(|c| c.total).sum();
    if by_category.is_empty() || total <= f64::EPSILON {
        return String::new();
    }

    let width = 520.0;
    let height = 280.0;
    let (cx, cy, r) = (140.0, 140.0, 104.0);

    let mut svg = svg_open(width, height);

    if by_category.len() == 1 {
        // A single slice is the whole disc; an arc from a point to itself
        // would draw nothing.
        svg.push_str(&format!(
            r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"##,
            PALETTE[0]
        ));
    } else {
        let mut angle = -90.0_f64;
        for (i, c) in by_category.iter().enumerate() {
            let sweep = (c.total / total) * 360.0;
            let (x1, y1) = arc_point(cx, cy, r, angle);
            let (x2, y2) = arc_point(cx, cy, r, angle + sweep);
            let large = if sweep > 180.0 { 1 } else { 0 };
            svg.push_str(&format!(
                r##"<path d="M {cx:.1} {cy:.1} L {x1:.1} {y1:.1} A {r:.1} {r:.1} 0 {large} 1 {x2:.1} {y2:.1} Z" fill="{}" stroke="#fff" stroke-width="1"/>"##,
                PALETTE[i % PALETTE.len()]
            ));
            angle += sweep;
        }
    }

    let legend_x = 290.0;
    let mut legend_y = 48.0;
    for (i, c) in by_category.iter().enumerate() {
        let pct = c.total / total * 100.0;
        svg.push_str(&format!(
            r##"<rect x="{legend_x}" y="{:.1}" width="12" height="12" fill="{}"/>"##,
            legend_y - 10.0,
            PALETTE[i % PALETTE.len()]
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{legend_y:.1}" fill="#222">{}: {} ({pct:.1}%)</text>"##,
            legend_x + 18.0,
            super::esc(&c.category),
            money(c.total)
        ));
        legend_y += 20.0;
    }

    svg.push_str("</g></svg>");
    svg
}

/// Monthly trend: one income line and one expense line over the observed
/// months, with point markers so a single month still shows up.
pub fn monthly_line_svg(monthly: &[MonthRow]) -> String {
    if monthly.is_empty() {
        return String::new();
    }

    let width = 640.0;
    let height = 300.0;
    let (ml, mr, mt, mb) = (60.0, 16.0, 24.0, 40.0);
    let plot_w = width - ml - mr;
    let plot_h = height - mt - mb;

    let max_val = monthly
        .iter()
        .flat_map(|m| [m.income, m.expense])
        .fold(0.0_f64, f64::max);
    let (top, mid) = y_axis_ticks(max_val.max(1.0));

    let n = monthly.len();
    let x_at = |i: usize| {
        if n == 1 {
            ml + plot_w / 2.0
        } else {
            ml + plot_w * i as f64 / (n - 1) as f64
        }
    };
    let y_at = |v: f64| mt + plot_h - (v / top) * plot_h;

    let mut svg = svg_open(width, height);
    svg.push_str(&grid_lines(ml, mt, plot_w, plot_h, top, mid));

    let series = [
        (monthly.iter().map(|m| m.income).collect::<Vec<f64>>(), INCOME_COLOR),
        (monthly.iter().map(|m| m.expense).collect::<Vec<f64>>(), EXPENSE_COLOR),
    ];
    for (values, color) in &series {
        if n > 1 {
            let points: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{:.1},{:.1}", x_at(i), y_at(*v)))
                .collect();
            svg.push_str(&format!(
                r##"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"##,
                points.join(" ")
            ));
        }
        for (i, v) in values.iter().enumerate() {
            svg.push_str(&format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{color}"/>"##,
                x_at(i),
                y_at(*v)
            ));
        }
    }

    // X labels; skip some when months outnumber the room for them.
    let step = n.div_ceil(12);
    for (i, m) in monthly.iter().enumerate() {
        if i % step != 0 {
            continue;
        }
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="#222">{}</text>"##,
            x_at(i),
            mt + plot_h + 18.0,
            crate::fmt::month_abbrev(&m.month)
        ));
    }

    // Legend
    svg.push_str(&format!(
        r##"<rect x="{ml}" y="4" width="12" height="12" fill="{INCOME_COLOR}"/><text x="{:.1}" y="14" fill="#222">income</text>"##,
        ml + 18.0
    ));
    svg.push_str(&format!(
        r##"<rect x="{:.1}" y="4" width="12" height="12" fill="{EXPENSE_COLOR}"/><text x="{:.1}" y="14" fill="#222">expense</text>"##,
        ml + 90.0,
        ml + 108.0
    ));

    svg.push_str("</g></svg>");
    svg
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="img"><g font-family="system-ui, sans-serif" font-size="12">"##
    )
}

/// Baseline, mid, and top gridlines with compact dollar tick labels.
fn grid_lines(ml: f64, mt: f64, plot_w: f64, plot_h: f64, top: f64, mid: f64) -> String {
    let mut out = String::new();
    for (value, y) in [(top, mt), (mid, mt + plot_h / 2.0), (0.0, mt + plot_h)] {
        out.push_str(&format!(
            r##"<line x1="{ml}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ddd"/>"##,
            ml + plot_w
        ));
        out.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="#666">{}</text>"##,
            ml - 6.0,
            y + 4.0,
            format_k(value)
        ));
    }
    out
}

fn arc_point(cx: f64, cy: f64, r: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}
