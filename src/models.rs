use chrono::NaiveDate;

/// Transaction polarity. The stored `type` column holds the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TxnKind {
    Expense,
    Income,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Expense => "expense",
            TxnKind::Income => "income",
        }
    }

    pub fn parse(s: &str) -> Option<TxnKind> {
        match s {
            "expense" => Some(TxnKind::Expense),
            "income" => Some(TxnKind::Income),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetched row, already typed. Amounts are non-negative; polarity
/// lives in `kind`. The user id is the query filter, not a row field.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: TxnKind,
    pub amount: f64,
    pub category: String,
}

impl Transaction {
    /// Calendar-month key for the pivot: "2024-03".
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
