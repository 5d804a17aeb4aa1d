use crate::domain::client_order_id::client_order_id;
use crate::models::{AmendOrder, CancelAll, CancelOrder, NewOrder, OrdType, OrderQuery, Side};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub fn ensure_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        anyhow::bail!("symbol can NOT be empty");
    }
    Ok(())
}

pub fn ensure_positive(name: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        anyhow::bail!("{} must be positive", name);
    }
    Ok(())
}

pub fn ensure_order_id(order_id: &str) -> Result<()> {
    if order_id.trim().is_empty() {
        anyhow::bail!("orderID can NOT be empty");
    }
    Ok(())
}

pub fn limit(
    symbol: &str,
    side: Side,
    qty: Decimal,
    price: Decimal,
    cl_ord_id_prefix: &str,
) -> Result<NewOrder> {
    ensure_symbol(symbol)?;
    ensure_positive("orderQty", qty)?;
    ensure_positive("price", price)?;
    Ok(NewOrder {
        symbol: symbol.to_string(),
        ord_type: OrdType::Limit,
        order_qty: side.signed(qty),
        price: Some(price),
        stop_px: None,
        cl_ord_id: client_order_id(cl_ord_id_prefix),
    })
}

pub fn market(symbol: &str, side: Side, qty: Decimal, cl_ord_id_prefix: &str) -> Result<NewOrder> {
    ensure_symbol(symbol)?;
    ensure_positive("orderQty", qty)?;
    Ok(NewOrder {
        symbol: symbol.to_string(),
        ord_type: OrdType::Market,
        order_qty: side.signed(qty),
        price: None,
        stop_px: None,
        cl_ord_id: client_order_id(cl_ord_id_prefix),
    })
}

/// Stop market: triggers at `stop_px` and then executes at market.
pub fn stop(
    symbol: &str,
    side: Side,
    qty: Decimal,
    stop_px: Decimal,
    cl_ord_id_prefix: &str,
) -> Result<NewOrder> {
    ensure_symbol(symbol)?;
    ensure_positive("orderQty", qty)?;
    ensure_positive("stopPx", stop_px)?;
    Ok(NewOrder {
        symbol: symbol.to_string(),
        ord_type: OrdType::Stop,
        order_qty: side.signed(qty),
        price: None,
        stop_px: Some(stop_px),
        cl_ord_id: client_order_id(cl_ord_id_prefix),
    })
}

/// Like a stop market, but enters a limit order at `price` once `stop_px` trades.
pub fn stop_limit(
    symbol: &str,
    side: Side,
    qty: Decimal,
    price: Decimal,
    stop_px: Decimal,
    cl_ord_id_prefix: &str,
) -> Result<NewOrder> {
    ensure_symbol(symbol)?;
    ensure_positive("orderQty", qty)?;
    ensure_positive("price", price)?;
    ensure_positive("stopPx", stop_px)?;
    Ok(NewOrder {
        symbol: symbol.to_string(),
        ord_type: OrdType::StopLimit,
        order_qty: side.signed(qty),
        price: Some(price),
        stop_px: Some(stop_px),
        cl_ord_id: client_order_id(cl_ord_id_prefix),
    })
}

/// Stop limit on the side that closes a position held on `position_side`.
pub fn take_profit(
    symbol: &str,
    position_side: Side,
    qty: Decimal,
    price: Decimal,
    stop_px: Decimal,
    cl_ord_id_prefix: &str,
) -> Result<NewOrder> {
    stop_limit(
        symbol,
        position_side.opposite(),
        qty,
        price,
        stop_px,
        cl_ord_id_prefix,
    )
}

pub fn amend(
    symbol: &str,
    order_id: &str,
    qty: Option<Decimal>,
    price: Decimal,
    stop_px: Option<Decimal>,
) -> Result<AmendOrder> {
    ensure_symbol(symbol)?;
    ensure_order_id(order_id)?;
    ensure_positive("price", price)?;
    if let Some(q) = qty {
        ensure_positive("orderQty", q)?;
    }
    Ok(AmendOrder {
        order_id: order_id.to_string(),
        order_qty: qty,
        price: Some(price),
        stop_px,
    })
}

pub fn cancel(order_id: &str) -> Result<CancelOrder> {
    ensure_order_id(order_id)?;
    Ok(CancelOrder {
        order_id: Some(order_id.to_string()),
        cl_ord_id: None,
        text: None,
    })
}

pub fn cancel_all(symbol: Option<&str>) -> Result<CancelAll> {
    if let Some(s) = symbol {
        ensure_symbol(s)?;
    }
    Ok(CancelAll {
        symbol: symbol.map(str::to_string),
    })
}

pub fn history(
    symbol: &str,
    filter: &str,
    count: u32,
    reverse: bool,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
) -> Result<OrderQuery> {
    ensure_symbol(symbol)?;
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start > end {
            anyhow::bail!("startTime {} is after endTime {}", start, end);
        }
    }
    let filter = if filter.trim().is_empty() {
        None
    } else {
        let parsed: serde_json::Value = serde_json::from_str(filter)
            .map_err(|e| anyhow::anyhow!("filter must be a JSON object: {}", e))?;
        if !parsed.is_object() {
            anyhow::bail!("filter must be a JSON object, got: {}", filter);
        }
        Some(filter.to_string())
    };
    Ok(OrderQuery {
        symbol: symbol.to_string(),
        filter,
        count,
        reverse,
        start_time,
        end_time,
    })
}
