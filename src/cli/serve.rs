use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;
use crate::settings::load_settings;
use crate::web;

pub fn run(listen: Option<String>) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(tracing::level_filters::LevelFilter::INFO.into()),
        )
        .init();

    crate::cli::require_db()?;

    let mut settings = load_settings();
    if let Some(addr) = listen {
        settings.listen_addr = addr;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(web::serve(&settings))
}
