use anyhow::{Context, bail};
use clap::Parser;
use eth2_api::{
    config::load_client_config,
    http::{Eth2HttpClient, Eth2HttpOptions},
    log::init_logging,
    models::primitives::{ApiState, Fork, HeadInfo, Opaque, Root, Slot},
    obj::ToObj,
    route::{Args, EndpointNode},
};
use log::{debug, info};

use crate::cli::{Cli, Commands};

mod cli;

fn print_obj(value: &impl ToObj) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&value.to_obj()).context("Failed to format response")?;
    println!("{text}");
    Ok(())
}

fn state_node(states: &EndpointNode, state_id: &str) -> anyhow::Result<EndpointNode> {
    let node = match state_id {
        "head" | "finalized" | "justified" | "genesis" => states.route(state_id)?,
        id if id.starts_with("0x") => {
            let root: Root = id.parse().context("Invalid state root")?;
            states.route("state_root")?.at(root)?
        },
        id => {
            let slot: u64 = id.parse().with_context(|| format!("Unknown state id '{id}'"))?;
            states.route("slot")?.at(Slot(slot))?
        },
    };
    Ok(node)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_config)?;

    let mut config = load_client_config(&cli.config)?;
    config.apply_node(cli.base_url.as_deref(), cli.resp_type.map(Into::into));
    info!(
        base_url = config.api_base_url.as_str();
        "Connecting to beacon node"
    );

    let client = Eth2HttpClient::open(Eth2HttpOptions::from(&config)).context("Failed to open client")?;
    let api = client.api()?;
    let beacon = api.route("beacon")?;

    match cli.command {
        Commands::Head => {
            let head: HeadInfo = beacon.endpoint("head")?.call(Args::new()).await?.into_value()?;
            print_obj(&head)?;
        },
        Commands::Enr => {
            let enr: String = api
                .route("network")?
                .endpoint("enr")?
                .call(Args::new())
                .await?
                .into_value()?;
            println!("{enr}");
        },
        Commands::State { slot, root } => {
            if slot.is_none() && root.is_none() {
                bail!("Either --slot or --root is required");
            }
            let root = root
                .map(|r| r.parse::<Root>())
                .transpose()
                .context("Invalid state root")?;
            let args = Args::new().kw("root", root).kw("slot", slot.map(Slot));
            let state: ApiState = beacon.endpoint("state")?.call(args).await?.into_value()?;
            match &state.beacon_state {
                Opaque::Obj(_) => print_obj(&state)?,
                Opaque::Ssz(bytes) => println!("state_root: {}\nssz payload: {} bytes", state.root, bytes.len()),
            }
        },
        Commands::Fork { state_id } => {
            let node = state_node(&beacon.route("states")?, &state_id)?;
            let fork: Fork = node.endpoint("fork")?.call(Args::new()).await?.into_value()?;
            print_obj(&fork)?;
        },
    }

    if let Some(latency) = client.get_last_request_latency().await {
        debug!(latency:? = latency; "Last request latency");
    }
    Ok(())
}
