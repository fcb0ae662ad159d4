/*!
 * Toggleable rule registry.
 *
 * A handful of symbol rules have drifted in and out of the active rule
 * set over the project's history. Instead of deleting their logic they
 * are kept behind independent toggles; the defaults mirror the latest
 * observed state (all three off). The two validator passes themselves
 * can also be switched off wholesale.
 */

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Rules that are implemented but disabled by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalRule {
    /// The dash `―` must appear exactly twice when it appears at all
    DashPairing,

    /// `、` must sit between identical characters; `，` between identical
    /// characters should have been `、`
    CommaSibling,

    /// Runs of `…` must have even length
    EllipsisPairs,
}

/// Active rule configuration threaded through the validators
#[derive(Debug, Clone)]
pub struct RuleToggles {
    /// Run the structural pass
    pub structural: bool,

    /// Run the symbol pass
    pub symbol: bool,

    enabled: HashSet<OptionalRule>,
}

impl Default for RuleToggles {
    fn default() -> Self {
        RuleToggles {
            structural: true,
            symbol: true,
            enabled: HashSet::new(),
        }
    }
}

impl RuleToggles {
    /// Build toggles with the given optional rules switched on
    pub fn with_optional(rules: &[OptionalRule]) -> Self {
        RuleToggles {
            enabled: rules.iter().copied().collect(),
            ..RuleToggles::default()
        }
    }

    /// Switch an optional rule on
    pub fn enable(&mut self, rule: OptionalRule) {
        self.enabled.insert(rule);
    }

    /// Whether an optional rule is active
    pub fn is_enabled(&self, rule: OptionalRule) -> bool {
        self.enabled.contains(&rule)
    }
}
