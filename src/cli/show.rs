use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::aggregate::{CategoryTotal, MonthRow, Projections};
use crate::error::Result;
use crate::fmt::money;
use crate::models::{Transaction, TxnKind};
use crate::render::{self, RenderOutcome};
use crate::store::SqliteStore;

pub fn run(user: &str) -> Result<()> {
    let user_id = crate::params::parse_user_id(user)?;
    let store = SqliteStore::new(crate::cli::require_db()?);

    println!("{}", format!("User identified: {user_id}").green());

    match render::render(&store, user_id)? {
        RenderOutcome::NoData { .. } => {
            println!("{}", "No transactions found for this user.".yellow());
        }
        RenderOutcome::Dashboard(d) => {
            println!();
            println!("{}", format_transactions(&d.transactions));
            println!();
            println!("{}", format_summary(&d.projections));
            if !d.projections.by_category.is_empty() {
                println!();
                println!("{}", format_categories(&d.projections.by_category));
            }
            println!();
            println!("{}", format_monthly(&d.projections.monthly));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Pure formatting functions (dashboard data → String)
// ---------------------------------------------------------------------------

pub fn format_transactions(rows: &[Transaction]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Type", "Amount", "Category"]);
    for txn in rows {
        let kind_label = match txn.kind {
            TxnKind::Income => txn.kind.as_str().green().to_string(),
            TxnKind::Expense => txn.kind.as_str().red().to_string(),
        };
        table.add_row(vec![
            Cell::new(txn.date),
            Cell::new(kind_label),
            Cell::new(money(txn.amount)),
            Cell::new(&txn.category),
        ]);
    }
    format!("Latest transactions\n{table}")
}

pub fn format_summary(p: &Projections) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Amount"]);
    for t in &p.by_type {
        let label = match t.kind {
            TxnKind::Income => t.kind.as_str().green().to_string(),
            TxnKind::Expense => t.kind.as_str().red().to_string(),
        };
        table.add_row(vec![Cell::new(label), Cell::new(money(t.total))]);
    }
    let balance_label = if p.totals.balance >= 0.0 {
        "Balance".green().bold()
    } else {
        "Balance".red().bold()
    };
    table.add_row(vec![
        Cell::new(balance_label),
        Cell::new(money(p.totals.balance)),
    ]);
    format!("Summary by type\n{table}")
}

pub fn format_categories(categories: &[CategoryTotal]) -> String {
    let total: f64 = categories.iter().map(|c| c.total).sum();
    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%"]);
    for c in categories {
        let pct = if total > 0.0 {
            c.total / total * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&c.category),
            Cell::new(money(c.total)),
            Cell::new(format!("{pct:.1}%")),
        ]);
    }
    format!("Expenses by category\n{table}")
}

pub fn format_monthly(months: &[MonthRow]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expense", "Net"]);
    for m in months {
        let net = m.income - m.expense;
        let net_str = if net >= 0.0 {
            money(net).green().to_string()
        } else {
            money(net).red().to_string()
        };
        table.add_row(vec![
            Cell::new(&m.month),
            Cell::new(money(m.income)),
            Cell::new(money(m.expense)),
            Cell::new(net_str),
        ]);
    }
    format!("Monthly trend\n{table}")
}
