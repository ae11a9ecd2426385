use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{load_settings, DB_ENV_VAR};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    if std::env::var(DB_ENV_VAR).map(|v| !v.is_empty()).unwrap_or(false) {
        println!("            (overridden by {DB_ENV_VAR})");
    }
    println!("Listen:     {}", settings.listen_addr);

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;

        let users: i64 = conn.query_row(
            "SELECT count(DISTINCT user_id) FROM transactions",
            [],
            |r| r.get(0),
        )?;
        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;

        println!();
        println!("Users:         {users}");
        println!("Transactions:  {transactions}");

        if transactions > 0 {
            let (first, last): (String, String) = conn.query_row(
                "SELECT min(date), max(date) FROM transactions",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )?;
            println!("Date range:    {first} to {last}");
        }
    } else {
        println!();
        println!("Database not found. Run `farthing init` to set up.");
    }

    Ok(())
}
