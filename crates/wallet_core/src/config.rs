use std::{fmt, fs};

use alloy::primitives::Address;
use shared::chain::{DEFAULT_RPC_URL, MONEY_TRANSFER_ADDRESS, SEPOLIA_CHAIN_ID};

#[derive(Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub chain_id: u64,
    pub contract_address: Address,
    pub private_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.into(),
            chain_id: SEPOLIA_CHAIN_ID,
            contract_address: MONEY_TRANSFER_ADDRESS,
            private_key: None,
        }
    }
}

// Manual impl so the key can never end up in log output.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("contract_address", &self.contract_address)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Defaults, overridden by the TOML file at `config_path`, overridden by
/// `BLX_*` environment variables.
pub fn load_settings(config_path: &str) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file_overrides(&mut settings, &raw);
    }

    apply_env_overrides(&mut settings);

    settings
}

// Fields are pulled out of the table one by one: a value that fails to parse
// is skipped without discarding the rest of the file. `chain_id` accepts both
// a TOML integer and a quoted string.
fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(table) = toml::from_str::<toml::Table>(raw) else {
        return;
    };

    if let Some(v) = table.get("rpc_url").and_then(|v| v.as_str()) {
        settings.rpc_url = v.to_string();
    }
    match table.get("chain_id") {
        Some(toml::Value::Integer(n)) => {
            if let Ok(parsed) = u64::try_from(*n) {
                settings.chain_id = parsed;
            }
        }
        Some(toml::Value::String(s)) => {
            if let Ok(parsed) = s.parse::<u64>() {
                settings.chain_id = parsed;
            }
        }
        _ => {}
    }
    if let Some(v) = table.get("contract_address").and_then(|v| v.as_str()) {
        if let Ok(parsed) = v.parse::<Address>() {
            settings.contract_address = parsed;
        }
    }
    if let Some(v) = table.get("private_key").and_then(|v| v.as_str()) {
        settings.private_key = Some(v.to_string());
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("BLX_RPC_URL") {
        settings.rpc_url = v;
    }
    if let Ok(v) = std::env::var("BLX_CHAIN_ID") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.chain_id = parsed;
        }
    }
    if let Ok(v) = std::env::var("BLX_CONTRACT_ADDRESS") {
        if let Ok(parsed) = v.parse::<Address>() {
            settings.contract_address = parsed;
        }
    }
    if let Ok(v) = std::env::var("BLX_PRIVATE_KEY") {
        settings.private_key = Some(v);
    }
}
