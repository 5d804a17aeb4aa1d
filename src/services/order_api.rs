use crate::adapters::OrderService;
use crate::domain::order_params;
use crate::models::{NewOrder, Order, Side};
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rust_decimal::Decimal;

/// Order placement on top of an [`OrderService`]: validate, build the payload, call, unwrap.
pub struct OrderApi<S> {
    service: S,
}

impl<S: OrderService> OrderApi<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    async fn submit(&self, order: NewOrder) -> Result<Order> {
        debug!("Submitting order: {:?}", order);
        let placed = self.service.order_new(&order).await?;
        info!(
            "{:?} {} {} placed: {} ({})",
            order.ord_type,
            order.symbol,
            order.order_qty,
            placed.order_id,
            placed.ord_status.as_deref().unwrap_or("unknown")
        );
        Ok(placed)
    }

    pub async fn limit_buy(
        &self,
        symbol: &str,
        order_qty: Decimal,
        price: Decimal,
        cl_ord_id_prefix: &str,
    ) -> Result<Order> {
        let order = order_params::limit(symbol, Side::Buy, order_qty, price, cl_ord_id_prefix)?;
        self.submit(order).await
    }

    pub async fn market_buy(
        &self,
        symbol: &str,
        order_qty: Decimal,
        cl_ord_id_prefix: &str,
    ) -> Result<Order> {
        let order = order_params::market(symbol, Side::Buy, order_qty, cl_ord_id_prefix)?;
        self.submit(order).await
    }

    pub async fn limit_sell(
        &self,
        symbol: &str,
        order_qty: Decimal,
        price: Decimal,
        cl_ord_id_prefix: &str,
    ) -> Result<Order> {
        let order = order_params::limit(symbol, Side::Sell, order_qty, price, cl_ord_id_prefix)?;
        self.submit(order).await
    }

    pub async fn market_sell(
        &self,
        symbol: &str,
        order_qty: Decimal,
        cl_ord_id_prefix: &str,
    ) -> Result<Order> {
        let order = order_params::market(symbol, Side::Sell, order_qty, cl_ord_id_prefix)?;
        self.submit(order).await
    }

    pub async fn stop_order(
        &self,
        symbol: &str,
        order_qty: Decimal,
        stop_px: Decimal,
        cl_ord_id_prefix: &str,
        side: Side,
    ) -> Result<Order> {
        let order = order_params::stop(symbol, side, order_qty, stop_px, cl_ord_id_prefix)?;
        self.submit(order).await
    }

    pub async fn stop_limit_order(
        &self,
        symbol: &str,
        order_qty: Decimal,
        price: Decimal,
        stop_px: Decimal,
        cl_ord_id_prefix: &str,
        side: Side,
    ) -> Result<Order> {
        let order =
            order_params::stop_limit(symbol, side, order_qty, price, stop_px, cl_ord_id_prefix)?;
        self.submit(order).await
    }

    /// Returns only the new order's id.
    pub async fn take_profit(
        &self,
        symbol: &str,
        order_qty: Decimal,
        price: Decimal,
        stop_px: Decimal,
        cl_ord_id_prefix: &str,
        position_side: Side,
    ) -> Result<String> {
        let order = order_params::take_profit(
            symbol,
            position_side,
            order_qty,
            price,
            stop_px,
            cl_ord_id_prefix,
        )?;
        Ok(self.submit(order).await?.order_id)
    }

    /// Change a resting order in place.
    pub async fn amend_order(
        &self,
        symbol: &str,
        order_qty: Option<Decimal>,
        price: Decimal,
        stop_px: Option<Decimal>,
        order_id: &str,
    ) -> Result<Order> {
        let amend = order_params::amend(symbol, order_id, order_qty, price, stop_px)?;
        debug!("Amending order: {:?}", amend);
        let order = self.service.order_amend(&amend).await?;
        info!("{} amended: price {:?}, stopPx {:?}", order.order_id, order.price, order.stop_px);
        Ok(order)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Vec<Order>> {
        let cancel = order_params::cancel(order_id)?;
        debug!("Cancelling order: {:?}", cancel);
        let orders = self.service.order_cancel(&cancel).await?;
        info!("Cancel {}: {} order(s) affected", order_id, orders.len());
        Ok(orders)
    }

    pub async fn cancel_all(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        let cancel = order_params::cancel_all(symbol)?;
        debug!("Cancelling all orders: {:?}", cancel);
        let orders = self.service.order_cancel_all(&cancel).await?;
        info!(
            "Cancel all ({}): {} order(s) cancelled",
            symbol.unwrap_or("all symbols"),
            orders.len()
        );
        Ok(orders)
    }

    pub async fn orders_history(
        &self,
        symbol: &str,
        filter: &str,
        count: u32,
        reverse: bool,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Vec<Order>> {
        let query = order_params::history(symbol, filter, count, reverse, start_time, end_time)?;
        debug!("Fetching order history: {:?}", query);
        let orders = self.service.order_get_orders(&query).await?;
        info!("Order history for {}: {} order(s)", symbol, orders.len());
        Ok(orders)
    }
}
