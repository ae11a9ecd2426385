use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::models::TxnKind;
use crate::settings::load_settings;

const DEMO_USERS: &[i64] = &[1, 2];
const MONTHS: u32 = 12;

struct DemoTxn {
    user_id: i64,
    date: String,
    kind: TxnKind,
    amount: f64,
    category: &'static str,
}

/// Fixed transactions generated every month.
struct RecurringTxn {
    day: u32,
    kind: TxnKind,
    amount: f64,
    category: &'static str,
}

const RECURRING_USER1: &[RecurringTxn] = &[
    RecurringTxn { day: 1, kind: TxnKind::Income, amount: 4200.00, category: "salary" },
    RecurringTxn { day: 3, kind: TxnKind::Expense, amount: 1450.00, category: "rent" },
    RecurringTxn { day: 5, kind: TxnKind::Expense, amount: 39.98, category: "subscriptions" },
];

const RECURRING_USER2: &[RecurringTxn] = &[
    RecurringTxn { day: 1, kind: TxnKind::Income, amount: 3100.00, category: "salary" },
    RecurringTxn { day: 2, kind: TxnKind::Expense, amount: 980.00, category: "rent" },
    RecurringTxn { day: 6, kind: TxnKind::Expense, amount: 60.00, category: "transport" },
];

/// Freelance income cycled across months (user 1 only).
const FREELANCE_BASES: &[f64] = &[420.00, 180.00, 650.00, 300.00, 520.00, 240.00];

/// Paired grocery trips cycled per month.
const GROCERY_AMOUNTS: &[(f64, f64)] = &[
    (82.14, 67.45),
    (95.50, 71.20),
    (78.30, 88.10),
    (102.25, 64.60),
    (69.99, 91.40),
    (84.15, 76.80),
];

/// Paired leisure outings cycled per month.
const LEISURE_AMOUNTS: &[(f64, f64)] = &[
    (28.50, 45.00),
    (64.15, 22.30),
    (35.60, 51.75),
    (18.99, 42.10),
    (55.20, 30.40),
    (47.80, 25.90),
];

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let last_day = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap())
        .pred_opt()
        .unwrap()
        .day();
    day.min(last_day)
}

fn make_date(year: i32, month: u32, day: u32) -> String {
    let d = clamp_day(year, month, day);
    format!("{year:04}-{month:02}-{d:02}")
}

/// Build 12 months of demo transactions for both users, ending at the
/// current month. Deterministic: amounts cycle by month index, with a
/// small index-based variation where real spending would wobble.
fn generate_transactions() -> Vec<DemoTxn> {
    let today = Local::now().date_naive();
    let mut txns = Vec::new();

    for i in 0..MONTHS {
        // Count backwards: i=0 is the oldest month, i=MONTHS-1 the current one
        let months_ago = MONTHS - 1 - i;
        let target = today - chrono::Months::new(months_ago);
        let year = target.year();
        let month = target.month();
        let idx = i as usize;

        // Up to ~3% wobble either way, keyed off the month index
        let vary = 1.0 + ((idx % 7) as f64 - 3.0) * 0.01;
        let wobble = |base: f64| (base * vary * 100.0).round() / 100.0;

        // — User 1: salaried with a freelance side —
        for r in RECURRING_USER1 {
            txns.push(DemoTxn {
                user_id: 1,
                date: make_date(year, month, r.day),
                kind: r.kind,
                amount: r.amount,
                category: r.category,
            });
        }
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 17),
            kind: TxnKind::Income,
            amount: FREELANCE_BASES[idx % FREELANCE_BASES.len()],
            category: "freelance",
        });
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 10),
            kind: TxnKind::Expense,
            amount: wobble(120.00),
            category: "utilities",
        });
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 15),
            kind: TxnKind::Expense,
            amount: wobble(90.00),
            category: "transport",
        });
        let (g1, g2) = GROCERY_AMOUNTS[idx % GROCERY_AMOUNTS.len()];
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 8),
            kind: TxnKind::Expense,
            amount: g1,
            category: "groceries",
        });
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 21),
            kind: TxnKind::Expense,
            amount: g2,
            category: "groceries",
        });
        let (l1, l2) = LEISURE_AMOUNTS[idx % LEISURE_AMOUNTS.len()];
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 14),
            kind: TxnKind::Expense,
            amount: l1,
            category: "leisure",
        });
        txns.push(DemoTxn {
            user_id: 1,
            date: make_date(year, month, 26),
            kind: TxnKind::Expense,
            amount: l2,
            category: "leisure",
        });

        // — User 2: single salary, tighter budget —
        for r in RECURRING_USER2 {
            txns.push(DemoTxn {
                user_id: 2,
                date: make_date(year, month, r.day),
                kind: r.kind,
                amount: r.amount,
                category: r.category,
            });
        }
        txns.push(DemoTxn {
            user_id: 2,
            date: make_date(year, month, 12),
            kind: TxnKind::Expense,
            amount: wobble(95.00),
            category: "utilities",
        });
        let (g1, g2) = GROCERY_AMOUNTS[(idx + 2) % GROCERY_AMOUNTS.len()];
        txns.push(DemoTxn {
            user_id: 2,
            date: make_date(year, month, 9),
            kind: TxnKind::Expense,
            amount: g1,
            category: "groceries",
        });
        txns.push(DemoTxn {
            user_id: 2,
            date: make_date(year, month, 23),
            kind: TxnKind::Expense,
            amount: g2,
            category: "groceries",
        });
        let (l1, _) = LEISURE_AMOUNTS[(idx + 3) % LEISURE_AMOUNTS.len()];
        txns.push(DemoTxn {
            user_id: 2,
            date: make_date(year, month, 19),
            kind: TxnKind::Expense,
            amount: l1,
            category: "leisure",
        });
    }

    txns
}

fn insert_demo_data(conn: &Connection) -> Result<usize> {
    let txns = generate_transactions();

    for txn in &txns {
        conn.execute(
            "INSERT INTO transactions (user_id, date, type, amount, category) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                txn.user_id,
                txn.date,
                txn.kind.as_str(),
                txn.amount,
                txn.category
            ],
        )?;
    }

    Ok(txns.len())
}

pub fn run() -> Result<()> {
    let db_path = crate::cli::require_db()?;
    let conn = get_connection(&db_path)?;
    init_db(&conn)?;

    // Idempotency guard
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM transactions WHERE user_id = ?1)",
        [DEMO_USERS[0]],
        |r| r.get(0),
    )?;
    if exists {
        println!(
            "Demo data already loaded (user {} has transactions).",
            DEMO_USERS[0]
        );
        return Ok(());
    }

    let txn_count = insert_demo_data(&conn)?;
    let settings = load_settings();

    println!("Demo data loaded!");
    println!(
        "  Users:        {}",
        DEMO_USERS
            .iter()
            .map(|u| u.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Transactions: {txn_count}");
    println!();
    println!("Try these next:");
    println!("  farthing show 1");
    println!("  farthing tui 2");
    println!("  farthing serve");
    println!("  then open http://{}/?user_id=1", settings.listen_addr);

    Ok(())
}
