pub mod bitmex;

use crate::models::{AmendOrder, CancelAll, CancelOrder, NewOrder, Order, OrderQuery};
use anyhow::Result;
use async_trait::async_trait;

/// Transport for the exchange's order endpoints.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn order_new(&self, order: &NewOrder) -> Result<Order>;

    async fn order_amend(&self, amend: &AmendOrder) -> Result<Order>;

    async fn order_cancel(&self, cancel: &CancelOrder) -> Result<Vec<Order>>;

    async fn order_cancel_all(&self, cancel: &CancelAll) -> Result<Vec<Order>>;

    async fn order_get_orders(&self, query: &OrderQuery) -> Result<Vec<Order>>;
}
