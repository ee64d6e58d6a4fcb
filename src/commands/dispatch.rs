//! Domain event dispatch command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::{Deserialize, Serialize};

use frontdesk_core::config::AppConfig;
use frontdesk_core::error::{AppError, ErrorKind};
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;
use frontdesk_service::EventRegistry;

use crate::output;

/// Arguments for the dispatch command
#[derive(Debug, Args)]
pub struct DispatchArgs {
    /// JSON file holding one event or an array of events
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventBatch {
    Many(Vec<DomainEvent>),
    One(Box<DomainEvent>),
}

impl EventBatch {
    fn into_events(self) -> Vec<DomainEvent> {
        match self {
            Self::Many(events) => events,
            Self::One(event) => vec![*event],
        }
    }
}

#[derive(Debug, Serialize)]
struct DispatchOutcome {
    event_type: EventType,
    created: u64,
}

/// Dispatch every event in the file, in order
pub async fn execute(args: &DispatchArgs, config: &AppConfig) -> Result<(), AppError> {
    let raw = tokio::fs::read_to_string(&args.file).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Failed to read {}", args.file.display()),
            e,
        )
    })?;
    let events = serde_json::from_str::<EventBatch>(&raw)?.into_events();

    let (stores, service) = super::create_service(config).await?;
    let registry = EventRegistry::with_default_handlers(Arc::clone(&service), stores.directory());

    let mut outcomes = Vec::with_capacity(events.len());
    for event in &events {
        let created = registry.dispatch(event).await?;
        outcomes.push(DispatchOutcome {
            event_type: event.kind(),
            created,
        });
    }

    let total: u64 = outcomes.iter().map(|o| o.created).sum();
    output::print_json(&outcomes);
    output::print_success(&format!(
        "Dispatched {} event(s), created {total} notification(s).",
        outcomes.len()
    ));
    Ok(())
}
