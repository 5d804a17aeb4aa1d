use crate::models::Side;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MAINNET_URL: &str = "https://www.bitmex.com";
pub const TESTNET_URL: &str = "https://testnet.bitmex.com";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Overrides `orders.client_order_id_prefix` from the config file.
    #[arg(long)]
    pub prefix: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    LimitBuy {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
        #[arg(long)]
        price: Decimal,
    },
    MarketBuy {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
    },
    LimitSell {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
        #[arg(long)]
        price: Decimal,
    },
    MarketSell {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
    },
    /// Stop market order.
    Stop {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
        #[arg(long)]
        stop_px: Decimal,
        #[arg(long)]
        side: Side,
    },
    StopLimit {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        stop_px: Decimal,
        #[arg(long)]
        side: Side,
    },
    /// Stop limit that closes a position held on `position_side`.
    TakeProfit {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        qty: Decimal,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        stop_px: Decimal,
        #[arg(long)]
        position_side: Side,
    },
    Amend {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        qty: Option<Decimal>,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        stop_px: Option<Decimal>,
    },
    Cancel {
        #[arg(long)]
        order_id: String,
    },
    CancelAll {
        #[arg(long)]
        symbol: Option<String>,
    },
    History {
        #[arg(long)]
        symbol: Option<String>,
        /// JSON object, e.g. '{"open": true}'.
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(long, default_value_t = 100)]
        count: u32,
        #[arg(long)]
        reverse: bool,
        /// RFC 3339, e.g. 2024-03-01T00:00:00Z.
        #[arg(long)]
        start_time: Option<chrono::DateTime<chrono::Utc>>,
        #[arg(long)]
        end_time: Option<chrono::DateTime<chrono::Utc>>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bitmex: BitmexConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitmexConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Routes requests to testnet when `base_url` is left at mainnet.
    #[serde(default)]
    pub testnet: bool,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Seconds added to now for the `api-expires` header.
    #[serde(default = "default_expires_after_secs")]
    pub expires_after_secs: u64,
}

fn default_base_url() -> String {
    MAINNET_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_expires_after_secs() -> u64 {
    60
}

impl Default for BitmexConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            testnet: false,
            api_key: None,
            api_secret: None,
            request_timeout_secs: default_request_timeout_secs(),
            expires_after_secs: default_expires_after_secs(),
        }
    }
}

impl BitmexConfig {
    pub fn effective_base_url(&self) -> &str {
        if self.testnet && self.base_url.trim_end_matches('/') == MAINNET_URL {
            TESTNET_URL
        } else {
            &self.base_url
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Empty disables client order ids.
    #[serde(default)]
    pub client_order_id_prefix: String,
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
}

fn default_symbol() -> String {
    "XBTUSD".to_string()
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            client_order_id_prefix: String::new(),
            default_symbol: default_symbol(),
        }
    }
}

impl Config {
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let config = Config::default();
            let content = serde_json::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }
}
