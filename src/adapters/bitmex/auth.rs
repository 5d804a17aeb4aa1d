use anyhow::Result;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate the `api-signature` header: hex(HMAC-SHA256(secret, verb + path + expires + body)).
/// `path` includes the `/api/v1` prefix and the query string, exactly as sent.
pub fn generate_signature(
    secret: &str,
    verb: &str,
    path: &str,
    expires: u64,
    body: &str,
) -> Result<String> {
    let message = format!("{}{}{}{}", verb, path, expires, body);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to create HMAC: {}", e))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
