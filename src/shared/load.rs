//! Per-resource load tracking: lifecycle state plus a request-generation counter.

use serde::{Deserialize, Serialize};

// ─── LoadState ───────────────────────────────────────────────────────────────

/// Per-resource load lifecycle.
///
/// `Loaded` and `Failed` are stable until the next load re-enters `Loading`.
/// Data from the last successful load stays in place while `Loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── StaleResponsePolicy ─────────────────────────────────────────────────────

/// What to do with a response that arrives after a newer request for the same
/// resource was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Drop responses older than the latest issued request.
    #[default]
    LastRequestWins,
    /// Apply every response in arrival order.
    LastResponseWins,
}

// ─── LoadTicket ──────────────────────────────────────────────────────────────

/// Issued when a load starts; handed back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ─── RequestTracker ──────────────────────────────────────────────────────────

/// Tracks one resource's load state and the latest issued request.
///
/// The state only leaves `Loading` when the response to the most recent request
/// settles, so an older response can never clear the flag under a newer request.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    state: LoadState,
    issued: u64,
    policy: StaleResponsePolicy,
}

impl RequestTracker {
    pub fn new(policy: StaleResponsePolicy) -> Self {
        Self {
            state: LoadState::Idle,
            issued: 0,
            policy,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn policy(&self) -> StaleResponsePolicy {
        self.policy
    }

    /// Start a new request. Always succeeds; re-entrancy is the caller's call.
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.issued,
        }
    }

    /// Whether `ticket` belongs to the most recently issued request.
    pub fn is_latest(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.issued
    }

    /// Whether the response for `ticket` should be applied to view state.
    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        match self.policy {
            StaleResponsePolicy::LastRequestWins => self.is_latest(ticket),
            StaleResponsePolicy::LastResponseWins => true,
        }
    }

    /// Record the outcome of the request behind `ticket`.
    pub fn settle(&mut self, ticket: LoadTicket, succeeded: bool) {
        if self.is_latest(ticket) {
            self.state = if succeeded {
                LoadState::Loaded
            } else {
                LoadState::Failed
            };
        }
    }
}
