use crate::adapters::bitmex::client::{order_query_params, BitmexApi};
use crate::adapters::OrderService;
use crate::models::{AmendOrder, CancelAll, CancelOrder, NewOrder, Order, OrderQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
impl OrderService for BitmexApi {
    async fn order_new(&self, order: &NewOrder) -> Result<Order> {
        let body = serde_json::to_string(order).context("Failed to encode order")?;
        self.send(Method::POST, "/order", &[], Some(body)).await
    }

    async fn order_amend(&self, amend: &AmendOrder) -> Result<Order> {
        let body = serde_json::to_string(amend).context("Failed to encode amend")?;
        self.send(Method::PUT, "/order", &[], Some(body)).await
    }

    async fn order_cancel(&self, cancel: &CancelOrder) -> Result<Vec<Order>> {
        let body = serde_json::to_string(cancel).context("Failed to encode cancel")?;
        self.send(Method::DELETE, "/order", &[], Some(body)).await
    }

    async fn order_cancel_all(&self, cancel: &CancelAll) -> Result<Vec<Order>> {
        let body = serde_json::to_string(cancel).context("Failed to encode cancel all")?;
        self.send(Method::DELETE, "/order/all", &[], Some(body)).await
    }

    async fn order_get_orders(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        self.send(Method::GET, "/order", &order_query_params(query), None)
            .await
    }
}
