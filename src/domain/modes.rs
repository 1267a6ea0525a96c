use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumString},
};

/// How total capital is split across stages 1..N.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AllocationMode {
    /// Every stage gets 100/N percent.
    #[default]
    Equal,
    /// Stage percentages are edited by hand and need not sum to 100.
    Custom,
}

/// Whether stock weights are maintained automatically or left to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum WeightMode {
    #[default]
    Auto,
    Manual,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn allocation_mode_text_round_trips() {
        assert_eq!(AllocationMode::Equal.to_string(), "equal");
        assert_eq!(AllocationMode::from_str("custom").ok(), Some(AllocationMode::Custom));
        assert!(AllocationMode::from_str("weighted").is_err());
    }

    #[test]
    fn allocation_mode_serializes_lowercase() {
        let json = serde_json::to_string(&AllocationMode::Custom).unwrap_or_default();
        assert_eq!(json, "\"custom\"");
    }
}
