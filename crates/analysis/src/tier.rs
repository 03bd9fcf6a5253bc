use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardTier {
    Safe,
    SafeToModerate,
    ModerateToHigh,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierColors {
    pub background: &'static str,
    pub border: &'static str,
}

const GREEN: TierColors = TierColors {
    background: "#e8f5e9",
    border: "#43a047",
};
const AMBER: TierColors = TierColors {
    background: "#fff8e1",
    border: "#ffb300",
};
const RED: TierColors = TierColors {
    background: "#ffebee",
    border: "#e53935",
};
const GREY: TierColors = TierColors {
    background: "#f5f5f5",
    border: "#9e9e9e",
};

impl HazardTier {
    /// Maps an EWG decision string, ignoring case and surrounding whitespace.
    pub fn from_decision(decision: Option<&str>) -> Self {
        let Some(decision) = decision else {
            return HazardTier::Unknown;
        };
        match decision.trim().to_ascii_lowercase().as_str() {
            "low hazard" => HazardTier::Safe,
            "low hazard - moderate hazard" => HazardTier::SafeToModerate,
            "moderate hazard - high hazard" => HazardTier::ModerateToHigh,
            _ => HazardTier::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardTier::Safe => "safe",
            HazardTier::SafeToModerate => "safe-to-moderate",
            HazardTier::ModerateToHigh => "moderate-to-high",
            HazardTier::Unknown => "unknown",
        }
    }

    pub fn colors(&self) -> TierColors {
        match self {
            HazardTier::Safe => GREEN,
            HazardTier::SafeToModerate => AMBER,
            HazardTier::ModerateToHigh => RED,
            HazardTier::Unknown => GREY,
        }
    }
}

/// Tone of a free-from pill: absence is good news, presence is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillTone {
    Free,
    Contains,
}

impl PillTone {
    /// Non-positive counts mean the product is free of the attribute.
    pub fn for_count(count: i64) -> Self {
        if count <= 0 {
            PillTone::Free
        } else {
            PillTone::Contains
        }
    }

    pub fn colors(&self) -> TierColors {
        match self {
            PillTone::Free => GREEN,
            PillTone::Contains => RED,
        }
    }
}
