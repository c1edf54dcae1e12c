//! Pipeline constants configuration

use crate::damage::BracketPolicy;
use serde::{Deserialize, Serialize};

/// Tunable pipeline constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConstants {
    /// How multiplicative brackets below zero are treated
    #[serde(default)]
    pub bracket_policy: BracketPolicy,
    /// Highest crit count the crit search tries before giving up
    #[serde(default = "default_crit_search_limit")]
    pub crit_search_limit: u32,
    /// Largest crit count a request may ask the search to try
    #[serde(default = "default_max_crit_search_limit")]
    pub max_crit_search_limit: u32,
}

impl Default for PipelineConstants {
    fn default() -> Self {
        PipelineConstants {
            bracket_policy: BracketPolicy::default(),
            crit_search_limit: default_crit_search_limit(),
            max_crit_search_limit: default_max_crit_search_limit(),
        }
    }
}

fn default_crit_search_limit() -> u32 {
    50
}

fn default_max_crit_search_limit() -> u32 {
    1000
}
