use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// BitMEX carries the side in the sign of `orderQty`.
    pub fn signed(self, qty: Decimal) -> Decimal {
        match self {
            Side::Buy => qty,
            Side::Sell => -qty,
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => anyhow::bail!("Invalid side: {}. Must be 'Buy' or 'Sell'", s),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrdType {
    Limit,
    Market,
    Stop,
    StopLimit,
    MarketIfTouched,
    LimitIfTouched,
}

/// Body of POST /order.
///
/// Prices and quantities go out as JSON numbers (`f64`), so values beyond roughly 15
/// significant digits are rounded on the wire. Exchange tick and lot sizes stay well inside that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub symbol: String,
    #[serde(rename = "ordType")]
    pub ord_type: OrdType,
    #[serde(rename = "orderQty")]
    pub order_qty: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(rename = "stopPx", skip_serializing_if = "Option::is_none")]
    pub stop_px: Option<Decimal>,
    #[serde(rename = "clOrdID", skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
}

/// Body of PUT /order. Fields left as `None` keep their current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmendOrder {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "orderQty", skip_serializing_if = "Option::is_none")]
    pub order_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(rename = "stopPx", skip_serializing_if = "Option::is_none")]
    pub stop_px: Option<Decimal>,
}

/// Body of DELETE /order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelOrder {
    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(rename = "clOrdID", skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of DELETE /order/all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelAll {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Query of GET /order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderQuery {
    pub symbol: String,
    pub filter: Option<String>,
    pub count: u32,
    pub reverse: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "clOrdID", default)]
    pub cl_ord_id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(rename = "orderQty", default)]
    pub order_qty: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(rename = "stopPx", default)]
    pub stop_px: Option<Decimal>,
    /// Kept as text: the exchange reports types (e.g. `Pegged`) that are never sent from here.
    #[serde(rename = "ordType", default)]
    pub ord_type: Option<String>,
    #[serde(rename = "ordStatus", default)]
    pub ord_status: Option<String>,
    #[serde(rename = "leavesQty", default)]
    pub leaves_qty: Option<Decimal>,
    #[serde(rename = "cumQty", default)]
    pub cum_qty: Option<Decimal>,
    #[serde(rename = "avgPx", default)]
    pub avg_px: Option<Decimal>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "transactTime", default)]
    pub transact_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn side_signs_quantity() {
        assert_eq!(Side::Buy.signed(dec!(10)), dec!(10));
        assert_eq!(Side::Sell.signed(dec!(10)), dec!(-10));
        assert_eq!(Side::Buy.opposite(), Side::Sell);
    }

    #[test]
    fn parses_side_case_insensitively() {
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert!("long".parse::<Side>().is_err());
    }

    #[test]
    fn new_order_omits_absent_fields() {
        let order = NewOrder {
            symbol: "XBTUSD".to_string(),
            ord_type: OrdType::Market,
            order_qty: dec!(-25),
            price: None,
            stop_px: None,
            cl_ord_id: None,
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({"symbol": "XBTUSD", "ordType": "Market", "orderQty": -25.0})
        );
    }

    #[test]
    fn parses_exchange_order() {
        let raw = r#"{
            "orderID": "d0c5340b-6d6c-49d9-b567-48c4bfca13d2",
            "clOrdID": "bot-abc",
            "symbol": "XBTUSD",
            "side": "Buy",
            "orderQty": 100,
            "price": 6500.5,
            "stopPx": null,
            "ordType": "Limit",
            "ordStatus": "New",
            "leavesQty": 100,
            "cumQty": 0,
            "avgPx": null,
            "text": "Submitted via API.",
            "transactTime": "2018-02-08T04:30:36.000Z",
            "timestamp": "2018-02-08T04:30:36.000Z",
            "account": 12345
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.order_id, "d0c5340b-6d6c-49d9-b567-48c4bfca13d2");
        assert_eq!(order.side, Some(Side::Buy));
        assert_eq!(order.ord_type.as_deref(), Some("Limit"));
        assert_eq!(order.price, Some(dec!(6500.5)));
        assert_eq!(order.stop_px, None);
        assert!(order.timestamp.is_some());
    }

    #[test]
    fn parses_order_types_never_sent_from_here() {
        let raw = r#"{"orderID":"x","ordType":"Pegged","side":"Sell","ordStatus":"New"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.ord_type.as_deref(), Some("Pegged"));
        assert_eq!(order.side, Some(Side::Sell));

        let orders: Vec<Order> = serde_json::from_str(
            r#"[{"orderID":"a","ordType":"Limit"},{"orderID":"b","ordType":"Pegged"}]"#,
        )
        .unwrap();
        assert_eq!(orders.len(), 2);
    }

    #[test]
    fn amend_and_cancel_bodies_use_exchange_names() {
        let amend = AmendOrder {
            order_id: "abc".to_string(),
            order_qty: None,
            price: Some(dec!(6100.5)),
            stop_px: Some(dec!(6050)),
        };
        assert_eq!(
            serde_json::to_value(&amend).unwrap(),
            json!({"orderID": "abc", "price": 6100.5, "stopPx": 6050.0})
        );

        let cancel = CancelOrder {
            order_id: None,
            cl_ord_id: Some("bot-1".to_string()),
            text: None,
        };
        assert_eq!(serde_json::to_value(&cancel).unwrap(), json!({"clOrdID": "bot-1"}));

        let all = CancelAll { symbol: None };
        assert_eq!(serde_json::to_value(&all).unwrap(), json!({}));
        let all = CancelAll {
            symbol: Some("XBTUSD".to_string()),
        };
        assert_eq!(serde_json::to_value(&all).unwrap(), json!({"symbol": "XBTUSD"}));
    }

    #[test]
    fn typical_prices_survive_number_encoding() {
        let order = NewOrder {
            symbol: "XRPUSD".to_string(),
            ord_type: OrdType::Limit,
            order_qty: dec!(1000),
            price: Some(dec!(0.00012345)),
            stop_px: None,
            cl_ord_id: None,
        };
        let text = serde_json::to_string(&order).unwrap();
        assert!(text.contains(r#""price":0.00012345"#), "{}", text);
    }
}
