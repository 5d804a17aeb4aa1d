use anyhow::{Context, Result};
use bitmex_orders::config::{Args, Command, Config};
use bitmex_orders::{BitmexApi, OrderApi};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load(&args.config)
        .context(format!("Failed to load config from {}", args.config.display()))?;

    let bitmex = BitmexApi::new(&config.bitmex)?;
    if !bitmex.is_authenticated() {
        warn!("api_key/api_secret not set in config; requests will be unauthenticated");
    }
    info!("Using {}", config.bitmex.effective_base_url());

    let api = OrderApi::new(bitmex);
    let prefix = args
        .prefix
        .unwrap_or_else(|| config.orders.client_order_id_prefix.clone());
    let default_symbol = config.orders.default_symbol.clone();
    let sym = |s: Option<String>| s.unwrap_or_else(|| default_symbol.clone());

    match args.command {
        Command::LimitBuy { symbol, qty, price } => {
            print_json(&api.limit_buy(&sym(symbol), qty, price, &prefix).await?)
        }
        Command::MarketBuy { symbol, qty } => {
            print_json(&api.market_buy(&sym(symbol), qty, &prefix).await?)
        }
        Command::LimitSell { symbol, qty, price } => {
            print_json(&api.limit_sell(&sym(symbol), qty, price, &prefix).await?)
        }
        Command::MarketSell { symbol, qty } => {
            print_json(&api.market_sell(&sym(symbol), qty, &prefix).await?)
        }
        Command::Stop {
            symbol,
            qty,
            stop_px,
            side,
        } => print_json(
            &api.stop_order(&sym(symbol), qty, stop_px, &prefix, side)
                .await?,
        ),
        Command::StopLimit {
            symbol,
            qty,
            price,
            stop_px,
            side,
        } => print_json(
            &api.stop_limit_order(&sym(symbol), qty, price, stop_px, &prefix, side)
                .await?,
        ),
        Command::TakeProfit {
            symbol,
            qty,
            price,
            stop_px,
            position_side,
        } => {
            let order_id = api
                .take_profit(&sym(symbol), qty, price, stop_px, &prefix, position_side)
                .await?;
            println!("{}", order_id);
            Ok(())
        }
        Command::Amend {
            symbol,
            order_id,
            qty,
            price,
            stop_px,
        } => print_json(
            &api.amend_order(&sym(symbol), qty, price, stop_px, &order_id)
                .await?,
        ),
        Command::Cancel { order_id } => print_json(&api.cancel_order(&order_id).await?),
        Command::CancelAll { symbol } => print_json(&api.cancel_all(symbol.as_deref()).await?),
        Command::History {
            symbol,
            filter,
            count,
            reverse,
            start_time,
            end_time,
        } => print_json(
            &api.orders_history(&sym(symbol), &filter, count, reverse, start_time, end_time)
                .await?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
