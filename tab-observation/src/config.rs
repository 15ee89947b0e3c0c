use crate::error::ConfigError;
use serde::Deserialize;

/// What the producer side sees when it sends after the consuming observation is gone.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LateDelivery {
    /// `send` returns [`ChannelError::Closed`](crate::ChannelError::Closed).
    #[default]
    Reject,
    /// `send` succeeds and the batch is discarded.
    Drop,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ObservationConfig {
    pub late_delivery: LateDelivery,
}

impl ObservationConfig {
    /// Parse from a TOML document, e.g. `late-delivery = "drop"`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
