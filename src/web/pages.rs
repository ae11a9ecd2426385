//! HTML page assembly. Pages are format!-built strings around a shared
//! shell; every data-derived string goes through esc() on its way in.

use crate::fmt::money;
use crate::render::Dashboard;

use super::charts;
use super::esc;

const STYLE: &str = "
body { font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #1f2328; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.15rem; margin-top: 2rem; }
.banner { padding: .6rem .9rem; border-radius: 6px; margin: 1rem 0; }
.banner.ok { background: #dafbe1; border: 1px solid #aceebb; }
.banner.warn { background: #fff8c5; border: 1px solid #d4a72c66; }
.banner.err { background: #ffebe9; border: 1px solid #ff818266; }
.cards { display: flex; gap: 1rem; margin: 1rem 0; }
.card { flex: 1; border: 1px solid #d0d7de; border-radius: 6px; padding: .8rem 1rem; }
.card .label { color: #57606a; font-size: .85rem; }
.card .value { font-size: 1.3rem; font-weight: 600; }
.card .value.pos { color: #1a7f37; }
.card .value.neg { color: #cf222e; }
table { border-collapse: collapse; width: 100%; margin: .5rem 0; }
th, td { border-bottom: 1px solid #d8dee4; padding: .4rem .6rem; text-align: left; }
td.amount { text-align: right; font-variant-numeric: tabular-nums; }
.kind { padding: .1rem .5rem; border-radius: 999px; font-size: .8rem; }
.kind.income { background: #dafbe1; color: #1a7f37; }
.kind.expense { background: #ffebe9; color: #cf222e; }
footer { margin: 3rem 0 1rem; color: #57606a; font-size: .8rem; }
";

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Your money dashboard</h1>\n{body}\n\
         <footer>farthing — read-only view over the transactions store</footer>\n\
         </body>\n</html>\n",
        esc(title)
    )
}

/// The full dashboard: confirmation banner, metric cards, raw table,
/// then the three charts. The category pie disappears with the last
/// expense row; everything else is unconditional once data exists.
pub fn dashboard_page(d: &Dashboard) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<div class=\"banner ok\">User identified: {}</div>\n",
        d.user_id
    ));

    let t = &d.projections.totals;
    let balance_class = if t.balance < 0.0 { "neg" } else { "pos" };
    body.push_str(&format!(
        "<div class=\"cards\">\n\
         <div class=\"card\"><div class=\"label\">Total income</div><div class=\"value pos\">{}</div></div>\n\
         <div class=\"card\"><div class=\"label\">Total expense</div><div class=\"value neg\">{}</div></div>\n\
         <div class=\"card\"><div class=\"label\">Balance</div><div class=\"value {balance_class}\">{}</div></div>\n\
         </div>\n",
        money(t.income),
        money(t.expense),
        money(t.balance)
    ));

    body.push_str("<h2>Latest transactions</h2>\n<table>\n<tr><th>Date</th><th>Type</th><th>Amount</th><th>Category</th></tr>\n");
    for txn in &d.transactions {
        body.push_str(&format!(
            "<tr><td>{}</td><td><span class=\"kind {}\">{}</span></td><td class=\"amount\">{}</td><td>{}</td></tr>\n",
            txn.date,
            txn.kind.as_str(),
            txn.kind,
            money(txn.amount),
            esc(&txn.category)
        ));
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Summary by type</h2>\n");
    body.push_str(&charts::type_bar_svg(&d.projections.by_type));
    body.push('\n');

    if !d.projections.by_category.is_empty() {
        body.push_str("<h2>Expenses by category</h2>\n");
        body.push_str(&charts::category_pie_svg(&d.projections.by_category));
        body.push('\n');
    }

    body.push_str("<h2>Monthly trend</h2>\n");
    body.push_str(&charts::monthly_line_svg(&d.projections.monthly));
    body.push('\n');

    page_shell("farthing", &body)
}

/// Query ran, nothing matched: the notice and nothing else, no charts.
pub fn no_data_page(user_id: i64) -> String {
    let body = format!(
        "<div class=\"banner ok\">User identified: {user_id}</div>\n\
         <div class=\"banner warn\">No transactions found for this user.</div>\n"
    );
    page_shell("farthing", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!("<div class=\"banner err\">{}</div>\n", esc(message));
    page_shell("farthing", &body)
}
