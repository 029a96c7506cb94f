//! Subcommand handlers. Reads go through the read hooks or the derived
//! service queries; every mutation goes through its hook so validation
//! and error reporting match the library behaviour.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use torreblanca_client::{ClientConfig, EventsApi, EventsService, RecordApi, RecordService};
use torreblanca_core::record::{NewRecord, RecordPatch};
use torreblanca_core::types::DbId;
use torreblanca_hooks::management::DEFAULT_COUNTRY;
use torreblanca_hooks::{
    CreateRecordHook, DeleteRecordHook, EventsHook, MutationState, PrimaryRecordHook, RecordHook,
    RecordsHook, UpdateRecordHook,
};

use crate::format::{print_events, print_record, print_records};

/// Optional record fields shared by `create` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordFields {
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub schedule: Option<String>,
    /// Logo path as stored by the server
    #[arg(long)]
    pub logo: Option<String>,
    /// Public logo URL
    #[arg(long)]
    pub logo_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[command(flatten)]
    pub fields: RecordFields,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    pub id: DbId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[command(flatten)]
    pub fields: RecordFields,
}

impl CreateArgs {
    pub fn into_payload(self) -> NewRecord {
        let RecordFields {
            address,
            country,
            region,
            schedule,
            logo,
            logo_url,
        } = self.fields;
        NewRecord {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: address.unwrap_or_default(),
            country: country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            region,
            schedule,
            logo: logo.unwrap_or_default(),
            logo_url: logo_url.unwrap_or_default(),
        }
    }
}

impl UpdateArgs {
    /// Only the flags that were given.
    pub fn changes(&self) -> RecordPatch {
        let fields = self.fields.clone();
        RecordPatch {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: fields.address,
            country: fields.country,
            region: fields.region,
            schedule: fields.schedule,
            logo: fields.logo,
            logo_url: fields.logo_url,
        }
    }
}

/// Services built once per invocation from the environment.
pub struct Services {
    pub records: Arc<dyn RecordApi>,
    pub events: Arc<dyn EventsApi>,
}

impl Services {
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("failed to load client configuration")?;
        tracing::debug!(api_root = %config.api_root, "client configured");
        Ok(Self {
            records: Arc::new(RecordService::from_config(&config)?),
            events: Arc::new(EventsService::from_config(&config)?),
        })
    }
}

pub async fn cmd_list(services: &Services, json: bool) -> Result<()> {
    let hook = RecordsHook::new(services.records.clone());
    hook.mount().await;
    let state = hook.state();
    if let Some(error) = state.error {
        bail!(error);
    }
    print_records(&state.data, json)
}

pub async fn cmd_primary(services: &Services, json: bool) -> Result<()> {
    let hook = PrimaryRecordHook::new(services.records.clone());
    hook.mount().await;
    let state = hook.state();
    if let Some(error) = state.error {
        bail!(error);
    }
    print_record(state.data.as_ref(), json)
}

pub async fn cmd_get(services: &Services, id: DbId, json: bool) -> Result<()> {
    let hook = RecordHook::new(services.records.clone(), Some(id));
    hook.mount().await;
    let state = hook.state();
    if let Some(error) = state.error {
        bail!(error);
    }
    print_record(state.data.as_ref(), json)
}

pub async fn cmd_search(services: &Services, term: &str, json: bool) -> Result<()> {
    let records = services.records.search_by_name(term).await?;
    print_records(&records, json)
}

pub async fn cmd_region(services: &Services, region: &str, json: bool) -> Result<()> {
    let records = services.records.filter_by_region(region).await?;
    print_records(&records, json)
}

pub async fn cmd_country(services: &Services, country: &str, json: bool) -> Result<()> {
    let records = services.records.filter_by_country(country).await?;
    print_records(&records, json)
}

pub async fn cmd_create(services: &Services, args: CreateArgs) -> Result<()> {
    let hook = CreateRecordHook::new(services.records.clone());
    let payload = args.into_payload();
    let ok = hook.create(&payload).await;
    ensure_mutation(ok, hook.state(), "create")?;
    println!("Created record \"{}\".", payload.name);
    Ok(())
}

/// Fetch the current record, overlay the given flags, and send the full
/// representation back.
pub async fn cmd_update(services: &Services, args: UpdateArgs) -> Result<()> {
    let changes = args.changes();
    if changes.is_empty() {
        bail!("nothing to update: pass at least one field flag");
    }

    let current = RecordHook::new(services.records.clone(), Some(args.id));
    current.mount().await;
    let state = current.state();
    if let Some(error) = state.error {
        bail!(error);
    }
    let Some(record) = state.data else {
        bail!("record {} not found", args.id);
    };

    let mut payload = RecordPatch::from(&record);
    payload.apply(changes);

    let hook = UpdateRecordHook::new(services.records.clone());
    let ok = hook.update(args.id, &payload).await;
    ensure_mutation(ok, hook.state(), "update")?;
    println!("Updated record {}.", args.id);
    Ok(())
}

pub async fn cmd_delete(services: &Services, id: DbId) -> Result<()> {
    let hook = DeleteRecordHook::new(services.records.clone());
    let ok = hook.delete(id).await;
    ensure_mutation(ok, hook.state(), "delete")?;
    println!("Deleted record {id}.");
    Ok(())
}

pub async fn cmd_events(services: &Services, upcoming: bool, past: bool, json: bool) -> Result<()> {
    let hook = EventsHook::new(services.events.clone());
    hook.mount().await;
    if let Some(error) = hook.state().error {
        bail!(error);
    }
    let (mut upcoming_events, mut past_events) = hook.split();
    if upcoming {
        past_events.clear();
    }
    if past {
        upcoming_events.clear();
    }
    print_events(&upcoming_events, &past_events, json)
}

fn ensure_mutation(ok: bool, state: MutationState, action: &str) -> Result<()> {
    if ok {
        return Ok(());
    }
    let reason = state.error.unwrap_or_else(|| "unknown error".to_string());
    bail!("failed to {action} record: {reason}")
}
