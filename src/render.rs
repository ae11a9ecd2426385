use crate::aggregate::{self, Projections};
use crate::error::Result;
use crate::models::Transaction;
use crate::params;
use crate::store::TransactionStore;

/// Everything a presenter needs to draw one user's page. Built fresh per
/// render and dropped afterwards; nothing here outlives the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub user_id: i64,
    /// Raw rows, newest first.
    pub transactions: Vec<Transaction>,
    pub projections: Projections,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Dashboard(Dashboard),
    /// The query ran and matched nothing: presenters show a notice and
    /// draw no charts.
    NoData { user_id: i64 },
}

/// Fetch, aggregate, and shape the view model for one validated user.
/// Pure apart from the store call; knows nothing about HTML or terminals.
pub fn render(store: &dyn TransactionStore, user_id: i64) -> Result<RenderOutcome> {
    let mut rows = store.transactions_for_user(user_id)?;
    if rows.is_empty() {
        return Ok(RenderOutcome::NoData { user_id });
    }
    aggregate::sort_rows_desc(&mut rows);
    let projections = aggregate::project(&rows);
    Ok(RenderOutcome::Dashboard(Dashboard {
        user_id,
        transactions: rows,
        projections,
    }))
}

/// Full request pipeline: identify the user from query pairs, then render.
/// Parameter failures return before the store is ever touched.
pub fn render_query(
    store: &dyn TransactionStore,
    pairs: &[(String, String)],
) -> Result<RenderOutcome> {
    let user_id = params::identify_user(pairs)?;
    render(store, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarthingError;
    use crate::models::TxnKind;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory stand-in for the SQLite store. Counts fetches so tests
    /// can prove that bad parameters never reach the data layer.
    #[derive(Default)]
    struct MemoryStore {
        rows: HashMap<i64, Vec<Transaction>>,
        calls: AtomicUsize,
    }

    impl MemoryStore {
        fn with_user(user_id: i64, rows: Vec<Transaction>) -> Self {
            let mut map = HashMap::new();
            map.insert(user_id, rows);
            Self {
                rows: map,
                calls: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TransactionStore for MemoryStore {
        fn transactions_for_user(&self, user_id: i64) -> Result<Vec<Transaction>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.get(&user_id).cloned().unwrap_or_default())
        }
    }

    struct FailingStore;

    impl TransactionStore for FailingStore {
        fn transactions_for_user(&self, _user_id: i64) -> Result<Vec<Transaction>> {
            Err(FarthingError::Other("store unreachable".into()))
        }
    }

    fn txn(date: &str, kind: TxnKind, amount: f64, category: &str) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            amount,
            category: category.to_string(),
        }
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::with_user(
            42,
            vec![
                txn("2024-01-05", TxnKind::Expense, 50.00, "food"),
                txn("2024-01-20", TxnKind::Income, 1000.00, "salary"),
                txn("2024-02-01", TxnKind::Expense, 20.00, "food"),
            ],
        )
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_dashboard() {
        let store = sample_store();
        let outcome = render(&store, 42).unwrap();
        let d = match outcome {
            RenderOutcome::Dashboard(d) => d,
            other => panic!("expected dashboard, got {other:?}"),
        };
        assert_eq!(d.user_id, 42);
        assert_eq!(d.transactions.len(), 3);
        assert_eq!(d.transactions[0].date.to_string(), "2024-02-01");
        assert_eq!(d.projections.totals.balance, 930.00);
    }

    #[test]
    fn test_render_no_data() {
        let store = sample_store();
        let outcome = render(&store, 7).unwrap();
        assert_eq!(outcome, RenderOutcome::NoData { user_id: 7 });
    }

    #[test]
    fn test_render_is_stateless() {
        let store = sample_store();
        let first = render(&store, 42).unwrap();
        let second = render(&store, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_user_never_queries() {
        let store = sample_store();
        let err = render_query(&store, &pairs(&[("page", "2")])).unwrap_err();
        assert!(matches!(err, FarthingError::MissingUser));
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn test_invalid_user_never_queries() {
        let store = sample_store();
        let err = render_query(&store, &pairs(&[("user_id", "abc")])).unwrap_err();
        assert!(matches!(err, FarthingError::InvalidUser(_)));
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn test_valid_user_queries_once() {
        let store = sample_store();
        let outcome = render_query(&store, &pairs(&[("user_id", "42")])).unwrap();
        assert!(matches!(outcome, RenderOutcome::Dashboard(_)));
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn test_store_failure_propagates() {
        let err = render(&FailingStore, 42).unwrap_err();
        assert!(matches!(err, FarthingError::Other(_)));
    }
}
