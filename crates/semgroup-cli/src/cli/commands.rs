use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "create-mock-groups")]
#[command(version = BUILD_VERSION)]
#[command(about = "Create a Semaphore group, add, remove and update members, then validate a proof")]
#[command(long_about = None)]
pub struct Cli {
    #[arg(short, long, value_name = "NAME", env = "SEMGROUP_NETWORK", help = "Network the Semaphore contract is deployed on")]
    pub network: Option<String>,

    #[arg(long, value_name = "URL", env = "SEMGROUP_RPC_URL", help = "Override the network's RPC endpoint")]
    pub rpc_url: Option<String>,

    #[arg(long, value_name = "HEX", env = "SEMGROUP_PRIVATE_KEY", hide_env_values = true, help = "Private key of the group admin")]
    pub private_key: Option<String>,

    #[arg(short, long, value_name = "FILE", default_value = "semgroup.toml", help = "Path to config file")]
    pub config: PathBuf,

    #[arg(long, value_name = "FILE", help = "Deployments artifact (overrides config)")]
    pub deployments: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "SNARK artifacts directory (overrides config)")]
    pub artifacts_dir: Option<PathBuf>,

    #[arg(long, help = "Compare the on-chain root with the local group after each mutation")]
    pub check_roots: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "text", help = "Output format")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
