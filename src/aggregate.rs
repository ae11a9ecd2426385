use std::collections::BTreeMap;

use crate::models::{Transaction, TxnKind};

// ---------------------------------------------------------------------------
// Projections — derived per render, never stored
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TypeTotal {
    pub kind: TxnKind,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// One observed calendar month of the pivot, with a column per kind.
/// A month a user had only income in still carries expense = 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projections {
    /// Sum of amount per kind, in kind-name order. Absent kinds are omitted.
    pub by_type: Vec<TypeTotal>,
    /// Sum of amount per category over expense rows only, category-name
    /// order. Empty when the user has no expenses; presenters skip the
    /// category chart in that case.
    pub by_category: Vec<CategoryTotal>,
    /// Month × kind pivot over observed months, ascending.
    pub monthly: Vec<MonthRow>,
    pub totals: Totals,
}

/// Order rows newest-first. The fetch query already returns this order;
/// re-sorting keeps the contract independent of the store.
pub fn sort_rows_desc(rows: &mut [Transaction]) {
    rows.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Compute all projections in one pass over the rows. Pure: same rows in,
/// same projections out, regardless of row order.
pub fn project(rows: &[Transaction]) -> Projections {
    let mut type_sums: BTreeMap<TxnKind, f64> = BTreeMap::new();
    let mut category_sums: BTreeMap<String, f64> = BTreeMap::new();
    let mut month_sums: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for txn in rows {
        *type_sums.entry(txn.kind).or_insert(0.0) += txn.amount;
        let slot = month_sums.entry(txn.month_key()).or_insert((0.0, 0.0));
        match txn.kind {
            TxnKind::Income => slot.0 += txn.amount,
            TxnKind::Expense => {
                slot.1 += txn.amount;
                *category_sums.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
            }
        }
    }

    let by_type = type_sums
        .into_iter()
        .map(|(kind, total)| TypeTotal { kind, total })
        .collect();
    let by_category = category_sums
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    let monthly = month_sums
        .into_iter()
        .map(|(month, (income, expense))| MonthRow { month, income, expense })
        .collect();

    let income: f64 = rows
        .iter()
        .filter(|t| t.kind == TxnKind::Income)
        .map(|t| t.amount)
        .sum();
    let expense: f64 = rows
        .iter()
        .filter(|t| t.kind == TxnKind::Expense)
        .map(|t| t.amount)
        .sum();

    Projections {
        by_type,
        by_category,
        monthly,
        totals: Totals {
            income,
            expense,
            balance: income - expense,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, kind: TxnKind, amount: f64, category: &str) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            amount,
            category: category.to_string(),
        }
    }

    /// The worked example: user 42's three rows.
    fn sample_rows() -> Vec<Transaction> {
        vec![
            txn("2024-01-05", TxnKind::Expense, 50.00, "food"),
            txn("2024-01-20", TxnKind::Income, 1000.00, "salary"),
            txn("2024-02-01", TxnKind::Expense, 20.00, "food"),
        ]
    }

    #[test]
    fn test_by_type_sums() {
        let p = project(&sample_rows());
        assert_eq!(p.by_type.len(), 2);
        assert_eq!(p.by_type[0].kind, TxnKind::Expense);
        assert_eq!(p.by_type[0].total, 70.00);
        assert_eq!(p.by_type[1].kind, TxnKind::Income);
        assert_eq!(p.by_type[1].total, 1000.00);
    }

    #[test]
    fn test_by_category_expenses_only() {
        let p = project(&sample_rows());
        assert_eq!(p.by_category.len(), 1);
        assert_eq!(p.by_category[0].category, "food");
        assert_eq!(p.by_category[0].total, 70.00);
    }

    #[test]
    fn test_by_category_empty_without_expenses() {
        let rows = vec![txn("2024-01-20", TxnKind::Income, 1000.00, "salary")];
        let p = project(&rows);
        assert!(p.by_category.is_empty(), "income categories must not leak in");
        assert_eq!(p.by_type.len(), 1);
        assert_eq!(p.by_type[0].kind, TxnKind::Income);
    }

    #[test]
    fn test_monthly_pivot_zero_filled() {
        let p = project(&sample_rows());
        assert_eq!(p.monthly.len(), 2);
        assert_eq!(p.monthly[0].month, "2024-01");
        assert_eq!(p.monthly[0].income, 1000.00);
        assert_eq!(p.monthly[0].expense, 50.00);
        assert_eq!(p.monthly[1].month, "2024-02");
        assert_eq!(p.monthly[1].income, 0.0);
        assert_eq!(p.monthly[1].expense, 20.00);
    }

    #[test]
    fn test_totals_and_balance() {
        let p = project(&sample_rows());
        assert_eq!(p.totals.income, 1000.00);
        assert_eq!(p.totals.expense, 70.00);
        assert_eq!(p.totals.balance, 930.00);
    }

    #[test]
    fn test_type_sums_cover_all_rows() {
        let rows = sample_rows();
        let p = project(&rows);
        let by_type_sum: f64 = p.by_type.iter().map(|t| t.total).sum();
        let direct_sum: f64 = rows.iter().map(|t| t.amount).sum();
        assert_eq!(by_type_sum, direct_sum);

        let by_category_sum: f64 = p.by_category.iter().map(|c| c.total).sum();
        let expense_sum: f64 = rows
            .iter()
            .filter(|t| t.kind == TxnKind::Expense)
            .map(|t| t.amount)
            .sum();
        assert_eq!(by_category_sum, expense_sum);
    }

    #[test]
    fn test_project_is_idempotent() {
        let rows = sample_rows();
        assert_eq!(project(&rows), project(&rows));
    }

    #[test]
    fn test_projection_ignores_row_order() {
        let rows = sample_rows();
        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(project(&rows), project(&reversed));
    }

    #[test]
    fn test_sort_rows_desc() {
        let mut rows = sample_rows();
        sort_rows_desc(&mut rows);
        let dates: Vec<String> = rows.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-01", "2024-01-20", "2024-01-05"]);

        // Re-sorting an already sorted slice changes nothing.
        let snapshot = rows.clone();
        sort_rows_desc(&mut rows);
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn test_empty_rows_project_to_empty() {
        let p = project(&[]);
        assert!(p.by_type.is_empty());
        assert!(p.by_category.is_empty());
        assert!(p.monthly.is_empty());
        assert_eq!(p.totals.balance, 0.0);
    }

    #[test]
    fn test_months_across_years_stay_ordered() {
        let rows = vec![
            txn("2024-01-10", TxnKind::Income, 10.0, "salary"),
            txn("2023-12-31", TxnKind::Expense, 5.0, "food"),
        ];
        let p = project(&rows);
        let months: Vec<&str> = p.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01"]);
    }
}
