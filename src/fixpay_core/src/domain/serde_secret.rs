//! Serde support for `Secret<String>` fields that must survive the
//! persistence round trip (password and OTP hashes).

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Secret::from)
}
