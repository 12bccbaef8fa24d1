//! Profile attributes extracted from a successful identity lookup.
//!
//! The raw JSON body is deserialized into [`UserPayload`] and then turned into
//! [`ProfileAttributes`], decoding the badge bitmask, the subscription tier and
//! the account creation time embedded in the identifier.
use chrono::DateTime;
use serde::Deserialize;
use url::Url;

/// Milliseconds between the POSIX epoch and the identifier epoch.
pub const ID_EPOCH_MS: u64 = 1_420_070_400_000;

/// Bits of the identifier below the timestamp portion.
const ID_TIMESTAMP_SHIFT: u32 = 22;

/// Badge labels keyed by bit position, in ascending bit order.
pub const BADGES: [(u32, &str); 5] = [
    (0, "Discord Staff"),
    (1, "Discord Partner"),
    (2, "HypeSquad Events"),
    (3, "Bug Hunter Level 1"),
    (9, "Early Supporter"),
];

pub const NOT_AVAILABLE: &str = "Not available";
pub const NO_AVATAR: &str = "No avatar";

/// Response body of the identity-lookup endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub premium_type: Option<i64>,
    #[serde(default)]
    pub flags: Option<u64>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumTier {
    None,
    Tier1,
    Tier2,
}

impl PremiumTier {
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(1) => Self::Tier1,
            Some(2) => Self::Tier2,
            _ => Self::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Tier1 => "Nitro Classic",
            Self::Tier2 => "Nitro",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("identifier is not numeric: {0}")]
    BadIdentifier(String),
    #[error("identifier {0} encodes an out-of-range timestamp")]
    TimestampOutOfRange(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileAttributes {
    pub username: String,
    pub user_id: u64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub verified: bool,
    pub creation_date: String,
    pub premium: PremiumTier,
    pub badges: Vec<&'static str>,
    pub locale: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileAttributes {
    /// Assemble attributes from a lookup response. `avatar_base` is the host
    /// serving avatar images.
    pub fn from_payload(payload: UserPayload, avatar_base: &Url) -> Result<Self, ProfileError> {
        let user_id: u64 = payload
            .id
            .trim()
            .parse()
            .map_err(|_| ProfileError::BadIdentifier(payload.id.clone()))?;
        let username = match payload.discriminator.as_deref() {
            Some(d) if !d.is_empty() && d != "0" => format!("{}#{}", payload.username, d),
            _ => payload.username,
        };
        let avatar_url = payload
            .avatar
            .filter(|h| !h.is_empty())
            .map(|hash| avatar_url(avatar_base, user_id, &hash));
        Ok(Self {
            username,
            user_id,
            email: payload.email,
            phone: payload.phone,
            verified: payload.verified.unwrap_or(false),
            creation_date: creation_date(user_id)?,
            premium: PremiumTier::from_raw(payload.premium_type),
            badges: decode_badges(payload.flags.unwrap_or(0)),
            locale: payload.locale,
            avatar_url,
        })
    }

    /// Attribute name/value pairs in display order. Optional fields fall back
    /// to their sentinel text.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let badges = if self.badges.is_empty() {
            "None".to_string()
        } else {
            self.badges.join(", ")
        };
        vec![
            ("username", self.username.clone()),
            ("user_id", self.user_id.to_string()),
            ("email", or_not_available(&self.email)),
            ("phone", or_not_available(&self.phone)),
            ("verified", self.verified.to_string()),
            ("creation_date", self.creation_date.clone()),
            ("premium_type", self.premium.label().to_string()),
            ("badges", badges),
            ("locale", or_not_available(&self.locale)),
            (
                "avatar_url",
                self.avatar_url.clone().unwrap_or_else(|| NO_AVATAR.to_string()),
            ),
        ]
    }
}

fn or_not_available(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Labels for every known badge bit set in `flags`, ascending by bit.
pub fn decode_badges(flags: u64) -> Vec<&'static str> {
    BADGES
        .iter()
        .filter(|(bit, _)| flags & (1u64 << bit) != 0)
        .map(|(_, label)| *label)
        .collect()
}

/// POSIX seconds at which the identifier was minted.
pub fn creation_timestamp(user_id: u64) -> u64 {
    ((user_id >> ID_TIMESTAMP_SHIFT) + ID_EPOCH_MS) / 1000
}

/// Creation time of `user_id` as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn creation_date(user_id: u64) -> Result<String, ProfileError> {
    let secs = i64::try_from(creation_timestamp(user_id))
        .map_err(|_| ProfileError::TimestampOutOfRange(user_id))?;
    let dt = DateTime::from_timestamp(secs, 0).ok_or(ProfileError::TimestampOutOfRange(user_id))?;
    Ok(dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn avatar_url(base: &Url, user_id: u64, hash: &str) -> String {
    format!(
        "{}/avatars/{}/{}.png",
        base.as_str().trim_end_matches('/'),
        user_id,
        hash
    )
}
