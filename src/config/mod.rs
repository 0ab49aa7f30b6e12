//! Configuration file handling for the command line client.

mod defaults;
mod loader;

pub use defaults::ClientConfig;
pub use loader::{get_default_config, load_client_config, load_configuration, write_config_to};
