use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crate::error::Result;
use crate::fmt::{format_k, money, month_abbrev, y_axis_ticks};
use crate::models::TxnKind;
use crate::render::{self, Dashboard, RenderOutcome};
use crate::store::SqliteStore;
use crate::tui::{
    money_span, run_view, TuiView, ViewAction, EXPENSE_STYLE, FOOTER_STYLE, HEADER_STYLE,
    INCOME_STYLE,
};

const TOP_CATEGORY_COUNT: usize = 8;

/// Open the interactive dashboard for one user.
pub fn run(user: &str) -> Result<()> {
    let user_id = crate::params::parse_user_id(user)?;
    let store = SqliteStore::new(crate::cli::require_db()?);

    match render::render(&store, user_id)? {
        RenderOutcome::NoData { .. } => {
            println!("No transactions found for this user.");
            Ok(())
        }
        RenderOutcome::Dashboard(dash) => {
            let mut view = UserView::new(dash);
            run_view(&mut view)
        }
    }
}

struct UserView {
    dash: Dashboard,
    /// Expense categories sorted largest first, capped for the side panel.
    top_categories: Vec<(String, f64)>,
    offset: usize,
    visible_count: usize,
}

impl UserView {
    fn new(dash: Dashboard) -> Self {
        let mut top_categories: Vec<(String, f64)> = dash
            .projections
            .by_category
            .iter()
            .map(|c| (c.category.clone(), c.total))
            .collect();
        top_categories.sort_by(|a, b| b.1.total_cmp(&a.1));
        top_categories.truncate(TOP_CATEGORY_COUNT);
        Self {
            dash,
            top_categories,
            offset: 0,
            visible_count: 10,
        }
    }
}

impl TuiView for UserView {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep1, stats_area, sep2, charts_area, sep3, txns_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" Dashboard for user {}", self.dash.user_id))
                .style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget.clone(), sep2);
        frame.render_widget(sep_widget.clone(), sep3);

        // Totals
        let t = &self.dash.projections.totals;
        let stats_lines = vec![
            Line::from(vec![Span::raw(" Total income    "), money_span(t.income)]),
            Line::from(vec![Span::raw(" Total expense   "), money_span(-t.expense)]),
            Line::from(vec![Span::raw(" Balance         "), money_span(t.balance)]),
            Line::from(format!(" Transactions    {}", self.dash.transactions.len())),
        ];
        frame.render_widget(Paragraph::new(stats_lines), stats_area);

        // Charts: monthly trend on the left, top categories on the right
        let [chart_left, chart_right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(charts_area);

        let monthly = &self.dash.projections.monthly;
        if !monthly.is_empty() {
            let max_val = monthly
                .iter()
                .flat_map(|m| [m.income, m.expense])
                .fold(1.0_f64, f64::max);
            let (top_tick, mid_tick) = y_axis_ticks(max_val);
            let top_label = format_k(top_tick);
            let mid_label = format_k(mid_tick);
            let y_label_width = top_label.len().max(mid_label.len()) as u16 + 1;

            let [y_axis_area, bar_area] =
                Layout::horizontal([Constraint::Length(y_label_width), Constraint::Fill(1)])
                    .areas(chart_left);

            // Y-axis labels: top tick near top, mid tick at middle
            let inner_height = bar_area.height.saturating_sub(2); // title + month labels
            let mid_row = inner_height / 2;
            let mut y_lines: Vec<Line> = vec![Line::from("")]; // title row
            for row in 0..inner_height {
                if row == 0 {
                    y_lines.push(Line::from(Span::styled(
                        format!("{:>width$}", top_label, width = y_label_width as usize),
                        FOOTER_STYLE,
                    )));
                } else if row == mid_row {
                    y_lines.push(Line::from(Span::styled(
                        format!("{:>width$}", mid_label, width = y_label_width as usize),
                        FOOTER_STYLE,
                    )));
                } else {
                    y_lines.push(Line::from(""));
                }
            }
            frame.render_widget(Paragraph::new(y_lines), y_axis_area);

            let groups: Vec<BarGroup> = monthly
                .iter()
                .map(|m| {
                    let bars = vec![
                        Bar::default()
                            .value(m.income.round() as u64)
                            .style(INCOME_STYLE),
                        Bar::default()
                            .value(m.expense.round() as u64)
                            .style(EXPENSE_STYLE),
                    ];
                    BarGroup::default()
                        .label(Line::from(month_abbrev(&m.month)))
                        .bars(&bars)
                })
                .collect();

            let block = Block::default()
                .title("Monthly trend")
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .borders(Borders::NONE);

            let mut chart = BarChart::default()
                .block(block)
                .max(top_tick as u64)
                .bar_width(2)
                .bar_gap(0)
                .group_gap(1);
            for group in &groups {
                chart = chart.data(group.clone());
            }
            frame.render_widget(chart, bar_area);
        }

        if !self.top_categories.is_empty() {
            let name_width = self
                .top_categories
                .iter()
                .map(|(n, _)| n.len())
                .max()
                .unwrap_or(10);

            let mut lines = vec![Line::from(Span::styled(
                " Top categories",
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            for (name, val) in &self.top_categories {
                lines.push(Line::from(vec![
                    Span::raw(format!(" {:<width$}  ", name, width = name_width)),
                    money_span(-val),
                ]));
            }
            frame.render_widget(Paragraph::new(lines), chart_right);
        }

        // Scrollable transaction list, newest rows first
        let visible = txns_area.height.saturating_sub(1) as usize;
        self.visible_count = visible.max(1);

        let mut txn_lines = vec![Line::from(Span::styled(
            " Latest transactions",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for txn in self.dash.transactions.iter().skip(self.offset).take(visible) {
            let signed = match txn.kind {
                TxnKind::Income => txn.amount,
                TxnKind::Expense => -txn.amount,
            };
            let style = if signed < 0.0 {
                EXPENSE_STYLE
            } else {
                INCOME_STYLE
            };
            txn_lines.push(Line::from(vec![
                Span::raw(format!(" {}  {:<7}", txn.date, txn.kind.as_str())),
                Span::styled(format!("{:>14}", money(txn.amount)), style),
                Span::raw(format!("  {}", txn.category)),
            ]));
        }
        frame.render_widget(Paragraph::new(txn_lines), txns_area);

        let max = self.dash.transactions.len().saturating_sub(self.visible_count);
        let pos_info = if max > 0 {
            format!("  line {}/{}", self.offset + 1, self.dash.transactions.len())
        } else {
            String::new()
        };
        frame.render_widget(
            Paragraph::new(format!(
                " \u{2191}/\u{2193}=scroll  q/Esc=close{pos_info}"
            ))
            .style(FOOTER_STYLE),
            hints_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        let page = self.visible_count;
        let max = self.dash.transactions.len().saturating_sub(page);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => ViewAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.offset = self.offset.saturating_sub(1);
                ViewAction::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.offset = (self.offset + 1).min(max);
                ViewAction::Continue
            }
            KeyCode::PageUp => {
                self.offset = self.offset.saturating_sub(page);
                ViewAction::Continue
            }
            KeyCode::PageDown => {
                self.offset = (self.offset + page).min(max);
                ViewAction::Continue
            }
            KeyCode::Home => {
                self.offset = 0;
                ViewAction::Continue
            }
            KeyCode::End => {
                self.offset = max;
                ViewAction::Continue
            }
            _ => ViewAction::Continue,
        }
    }
}
