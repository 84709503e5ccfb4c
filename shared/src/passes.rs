use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership tiers a visitor can pick in the second step of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessPass {
    Fitness,
    Total,
    Kids,
}

impl FitnessPass {
    pub const ALL: [FitnessPass; 3] = [FitnessPass::Fitness, FitnessPass::Total, FitnessPass::Kids];

    pub fn id(self) -> &'static str {
        match self {
            FitnessPass::Fitness => "fitness",
            FitnessPass::Total => "total",
            FitnessPass::Kids => "kids",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pass| pass.id() == id)
    }

    pub fn option(self) -> &'static PassOption {
        match self {
            FitnessPass::Fitness => &PASS_OPTIONS[0],
            FitnessPass::Total => &PASS_OPTIONS[1],
            FitnessPass::Kids => &PASS_OPTIONS[2],
        }
    }
}

impl fmt::Display for FitnessPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option().label)
    }
}

/// Marketing copy shown on a pass card.
#[derive(Debug, PartialEq, Eq)]
pub struct PassOption {
    pub pass: FitnessPass,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
}

pub static PASS_OPTIONS: [PassOption; 3] = [
    PassOption {
        pass: FitnessPass::Fitness,
        label: "FITNESS PASS",
        icon: "💪",
        description: "Access to gym equipment and fitness areas",
        price: "189 EUR/year",
        features: &[
            "Full gym access",
            "STRENGTH TRAINING",
            "AQUAGYM",
            "CARDIO CLASSES",
            "WOMEN'S ONLY SPACE",
        ],
    },
    PassOption {
        pass: FitnessPass::Total,
        label: "TOTAL PASS",
        icon: "🏆",
        description: "Full access to all facilities including aqua zone",
        price: "249 EUR/year",
        features: &[
            "Complete access to all zones",
            "STRENGTH TRAINING",
            "AQUAGYM",
            "CARDIO CLASSES",
            "KICKBOXING",
            "FULL BODY PUMP & CIRCUIT TRAINING",
            "WOMEN'S ONLY SPACE",
        ],
    },
    PassOption {
        pass: FitnessPass::Kids,
        label: "PASS KIDS",
        icon: "👶",
        description: "Specialized programs for young athletes",
        price: "119 EUR/year",
        features: &[
            "OUTDOOR ACTIVITIES",
            "PHYSICAL CONDITIONING",
            "KICKBOXING",
            "POOL & AQUAGYM",
            "COMPETITIONS & CHALLENGES",
        ],
    },
];
