use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eth2_api::core::ContentType;

#[derive(Parser)]
#[command(name = "eth2-api")]
#[command(about = "Query an Eth2 beacon node over its HTTP API", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Path to the configuration file",
        default_value = "config/config.toml"
    )]
    pub config: PathBuf,
    #[arg(long, help = "Path to an external log4rs configuration", default_value = "log4rs.yml")]
    pub log_config: PathBuf,
    #[arg(short, long, help = "The base URL of the beacon node HTTP API")]
    pub base_url: Option<String>,
    #[arg(short, long, value_enum, help = "Preferred response encoding")]
    pub resp_type: Option<Format>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Json,
    Ssz,
}

impl From<Format> for ContentType {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ContentType::Json,
            Format::Ssz => ContentType::Ssz,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the node's view of the chain head
    Head,
    /// Show the node's ENR
    Enr,
    /// Fetch a beacon state by slot or state root
    State {
        #[arg(short, long, help = "Slot of the state", conflicts_with = "root")]
        slot: Option<u64>,
        #[arg(long, help = "State root in 0x-prefixed hex")]
        root: Option<String>,
    },
    /// Show the fork of a state
    Fork {
        #[arg(
            help = "head, finalized, justified, genesis, a slot number or a 0x-prefixed state root",
            default_value = "head"
        )]
        state_id: String,
    },
}
