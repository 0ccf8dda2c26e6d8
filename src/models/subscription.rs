// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Membership plans and the selector state.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Identifier of a plan in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Basic,
    Premium,
    Unlimited,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Basic => "basic",
            PlanId::Premium => "premium",
            PlanId::Unlimited => "unlimited",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(PlanId::Basic),
            "premium" => Some(PlanId::Premium),
            "unlimited" => Some(PlanId::Unlimited),
            _ => None,
        }
    }

    /// Catalog entry for this plan.
    pub fn plan(&self) -> &'static Plan {
        match self {
            PlanId::Basic => &PLANS[0],
            PlanId::Premium => &PLANS[1],
            PlanId::Unlimited => &PLANS[2],
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Plan {
    pub id: PlanId,
    pub title: &'static str,
    pub price: &'static str,
    pub description: &'static str,
}

pub static PLANS: [Plan; 3] = [
    Plan {
        id: PlanId::Basic,
        title: "Basic",
        price: "€20 / maand",
        description: "Toegang tot fitness en groepslessen.",
    },
    Plan {
        id: PlanId::Premium,
        title: "Premium",
        price: "€35 / maand",
        description: "Inclusief sauna & zwembad.",
    },
    Plan {
        id: PlanId::Unlimited,
        title: "Unlimited",
        price: "€50 / maand",
        description: "Onbeperkt sporten, all-in.",
    },
];

/// Selector state; confirmation is only possible while a plan is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SelectorState {
    Idle,
    PendingConfirmation { plan: PlanId },
}
