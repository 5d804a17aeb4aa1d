use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use uuid::Uuid;

/// Builds `prefix + base64(uuid v4)` without padding. An empty prefix means no client order id.
pub fn client_order_id(prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    let suffix = STANDARD_NO_PAD.encode(Uuid::new_v4().as_bytes());
    Some(format!("{}{}", prefix, suffix))
}
