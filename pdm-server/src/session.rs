//! Session tokens carried in the `custom-auth-session` cookie.
//!
//! A token is `hex(username).expiry.hex(hmac)`, where the HMAC-SHA256 covers
//! `hex(username).expiry`. There is no server-side session store.

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "custom-auth-session";

type HmacSha256 = Hmac<Sha256>;

/// Turns a username into an opaque token and back.
pub trait SessionCodec: Send + Sync {
    fn issue(&self, username: &str) -> String;

    /// The username, if the token is genuine and unexpired.
    fn verify(&self, token: &str) -> Option<String>;
}

/// HMAC-signed tokens with a fixed lifetime.
pub struct SignedSessions {
    mac: HmacSha256,
    ttl: Duration,
}

/// Session lifetime from a configured number of hours.
pub fn session_ttl(hours: i64) -> anyhow::Result<Duration> {
    if hours <= 0 {
        return Err(anyhow!("session lifetime must be positive, got {hours} hours"));
    }
    Duration::try_hours(hours)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| anyhow!("session lifetime of {hours} hours is out of range"))
}

impl SignedSessions {
    /// Rejects a lifetime that would push expiry past the representable range.
    pub fn new(key: &[u8], ttl: Duration) -> anyhow::Result<Self> {
        if ttl <= Duration::zero() || Utc::now().checked_add_signed(ttl).is_none() {
            return Err(anyhow!("session lifetime {ttl} is out of range"));
        }
        let mac = HmacSha256::new_from_slice(key).map_err(|e| anyhow!("invalid session key: {e}"))?;
        Ok(SignedSessions { mac, ttl })
    }

    /// A key that lives only as long as this process.
    pub fn random(ttl: Duration) -> anyhow::Result<Self> {
        let key: [u8; 32] = rand::random();
        SignedSessions::new(&key, ttl)
    }

    fn signature(&self, payload: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> String {
        let expires = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp();
        let payload = format!("{}.{}", hex::encode(username), expires);
        let tag = self.signature(&payload).finalize().into_bytes();
        format!("{}.{}", payload, hex::encode(tag))
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let mut parts = token.split('.');
        let (user_hex, expires, tag_hex) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let tag = hex::decode(tag_hex).ok()?;
        self.signature(&format!("{user_hex}.{expires}"))
            .verify_slice(&tag)
            .ok()?;
        if expires.parse::<i64>().ok()? <= now.timestamp() {
            return None;
        }
        String::from_utf8(hex::decode(user_hex).ok()?).ok()
    }
}

impl SessionCodec for SignedSessions {
    fn issue(&self, username: &str) -> String {
        self.issue_at(username, Utc::now())
    }

    fn verify(&self, token: &str) -> Option<String> {
        self.verify_at(token, Utc::now())
    }
}
