//! Command executor for dispatching CLI commands
//!
//! Turns a parsed subcommand into one facade call and renders the result.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;

use super::parser::Commands;
use crate::config::settings::Settings;
use crate::facade::{KeyValueFacade, TimeUnit};
use crate::store::{self, StoreError};

/// Printed for a missing string or hash field
const NIL: &str = "(nil)";

/// Connect to the configured store and run `command`, returning what to print
pub async fn execute_command(command: &Commands, settings: &Settings) -> anyhow::Result<String> {
    let store = store::connect(&settings.store)
        .await
        .with_context(|| format!("Failed to connect to {:?} store", settings.store.backend))?;
    let facade = KeyValueFacade::with_tracing(store);

    if *command == Commands::Check {
        return Ok(format!(
            "Configuration OK: application={} backend={:?}",
            settings.application.name, settings.store.backend
        ));
    }

    run_operation(&facade, command)
        .await
        .map_err(anyhow::Error::from)
}

/// Run a data command against an existing facade
pub async fn run_operation(
    facade: &KeyValueFacade,
    command: &Commands,
) -> Result<String, StoreError> {
    match command {
        Commands::Set {
            key,
            value,
            ttl,
            unit,
        } => {
            match ttl {
                Some(ttl) => {
                    let unit: TimeUnit = unit.map(Into::into).unwrap_or(TimeUnit::Seconds);
                    facade
                        .set_string_with_ttl(key, value, unit.to_duration(*ttl))
                        .await?
                }
                None => facade.set_string(key, value).await?,
            }
            Ok("OK".to_string())
        }
        Commands::Get { key } => Ok(facade
            .get_string(key)
            .await?
            .unwrap_or_else(|| NIL.to_string())),
        Commands::Lpush { key, value } => Ok(facade.list_push_front(key, value).await?.to_string()),
        Commands::Lrange { key, start, end } => {
            let items = facade.list_range(key, *start, *end).await?;
            Ok(render_json(&items))
        }
        Commands::Hmset { key, fields } => {
            let fields: HashMap<String, String> = fields.iter().cloned().collect();
            facade.hash_bulk_set(key, &fields).await?;
            Ok("OK".to_string())
        }
        Commands::Hget { key, field } => Ok(facade
            .hash_get(key, field)
            .await?
            .unwrap_or_else(|| NIL.to_string())),
        Commands::Hgetall { key } => {
            let sorted: BTreeMap<String, String> =
                facade.hash_get_all(key).await?.into_iter().collect();
            Ok(render_json(&sorted))
        }
        Commands::Del { key } => {
            let removed = facade.delete_key(key).await?;
            Ok(u8::from(removed).to_string())
        }
        Commands::Check => Ok("OK".to_string()),
    }
}

fn render_json<T: serde::Serialize>(value: &T) -> String {
    // Vec<String> and BTreeMap<String, String> cannot fail to serialize
    serde_json::to_string(value).unwrap_or_default()
}
