//! Command-line driver for the Entregas presentation layer.
//!
//! ```bash
//! entregas [config.json] [actions.json]
//! ```
//!
//! Loads the configuration (defaults when the file does not exist), replays
//! a list of UI actions against the app and prints every rendered screen as
//! pretty JSON. Without an actions file a built-in walk is replayed: log in,
//! visit the tabs, open and save a shipment, log out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use app_core::{AppConfig, StaticCatalog};
use app_ui::navigation::RouteId;
use app_ui::screens::{DashboardAction, FieldId};
use app_ui::{EntregasApp, UiAction};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "entregas.json";

fn main() -> Result<()> {
    let mut args = std::env::args_os().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let actions_path = args.next().map(PathBuf::from);

    let config = AppConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    config.validate().context("invalid configuration")?;

    init_logging(&config.log_filter)?;

    let actions = match actions_path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read actions from {}", path.display()))?;
            serde_json::from_str::<Vec<UiAction>>(&json)
                .with_context(|| format!("failed to parse actions in {}", path.display()))?
        }
        None => default_walk(),
    };

    let mut app = EntregasApp::new(config, Box::new(StaticCatalog::new()))
        .context("failed to start the app")?;
    app.root_mut().subscribe(|change| {
        tracing::info!(scope = change.scope, path = %change.path, depth = change.depth, "Route changed");
    });

    print_view(&app)?;
    for action in actions {
        let name = action.name();
        match app.dispatch(action) {
            Ok(update) => tracing::debug!(action = name, ?update, "Action handled"),
            Err(err) => {
                tracing::warn!(action = name, "Action rejected: {}", err);
                continue;
            }
        }
        print_view(&app)?;
    }

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over `default_filter`
fn init_logging(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install the log subscriber")
}

fn print_view(app: &EntregasApp) -> Result<()> {
    let view = app.render().context("failed to render the current screen")?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn default_walk() -> Vec<UiAction> {
    vec![
        UiAction::EditField {
            field: FieldId::Email,
            value: "mensajero@entregas.co".to_string(),
        },
        UiAction::EditField {
            field: FieldId::Password,
            value: "secreto".to_string(),
        },
        UiAction::SubmitLogin,
        UiAction::Dashboard {
            action: DashboardAction::DeliverShipments,
        },
        UiAction::OpenShipment {
            id: "ENV-002".to_string(),
        },
        UiAction::SetDelivered { delivered: true },
        UiAction::EditField {
            field: FieldId::ReceiverName,
            value: "Marta Gómez".to_string(),
        },
        UiAction::SaveDelivery,
        UiAction::SelectTab {
            route: RouteId::Profile,
        },
        UiAction::Logout,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logging_init_is_reported() {
        init_logging("debug").unwrap();
        let err = init_logging("debug").unwrap_err();
        assert!(err.to_string().contains("log subscriber"));
    }

    #[test]
    fn test_default_walk_parses_back_from_json() {
        let walk = default_walk();
        let json = serde_json::to_string(&walk).unwrap();
        let parsed: Vec<UiAction> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, walk);
    }
}
