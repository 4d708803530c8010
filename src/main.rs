use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use option_picker_bot::bot::schema;
use option_picker_bot::config::{BotConfig, ConfigError, LogFormat};
use option_picker_bot::selection::SelectionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    let dotenv_result = dotenv::dotenv();

    init_logging(LogFormat::from_env());

    if let Err(e) = dotenv_result {
        warn!(error = %e, "Error loading .env file");
    }

    info!("Starting Option Picker Telegram Bot");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingToken) => {
            // Nothing to run without a token; exit without an error status
            info!("{}", ConfigError::MissingToken);
            return Ok(());
        }
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let bot = Bot::new(config.telegram_token.clone());

    let me = match bot.get_me().await {
        Ok(me) => me,
        Err(e) => {
            error!(error = %e, "Error while starting the application");
            return Err(e.into());
        }
    };

    info!(
        username = %me.username(),
        selection_scope = %config.selection_scope,
        "Bot is now running. Press CTRL-C to exit."
    );

    let store = Arc::new(SelectionStore::new(config.selection_scope));

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![store])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Ignoring unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");

    Ok(())
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
