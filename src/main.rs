use clap::Parser;

use kvfacade::cli::{Cli, execute_command, init_logger_from_settings, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logger_from_settings(&cli, &settings)?;

    tracing::debug!(
        application = %settings.application.name,
        version = %settings.application.version,
        backend = ?settings.store.backend,
        "Starting kvfacade"
    );

    let output = execute_command(&cli.command, &settings).await?;
    println!("{}", output);

    Ok(())
}
