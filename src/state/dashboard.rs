//! Dashboard data loader and derived quick statistics.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route's data source. On mount it fetches
//! the property collection and recomputes `QuickStats` client-side.
//!
//! TRADE-OFFS
//! ==========
//! A failed fetch is logged and the loader still reaches `Ready`, with stats
//! left absent instead of raising to the page. `stats_unavailable` lets a
//! render tell "load failed" apart from a genuinely empty portfolio while the
//! stat cards keep showing zeros.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::sync::Mutex;

use crate::net::api::ApiClient;
use crate::net::types::Property;

/// Number of properties shown in the "recent properties" panel.
pub const RECENT_PROPERTY_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardPhase {
    #[default]
    Loading,
    Ready,
}

/// Client-derived summary aggregates. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuickStats {
    pub total_properties: usize,
    /// Sum of purchase prices; missing prices count as zero.
    pub total_value: f64,
    /// Comes from rental contracts server-side; always zero here.
    pub monthly_income: f64,
    /// Comes from financial movements server-side; always zero here.
    pub monthly_expenses: f64,
}

impl QuickStats {
    #[must_use]
    pub fn from_properties(properties: &[Property]) -> Self {
        Self {
            total_properties: properties.len(),
            total_value: properties
                .iter()
                .map(|p| p.purchase_price.unwrap_or(0.0))
                .sum(),
            monthly_income: 0.0,
            monthly_expenses: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub phase: DashboardPhase,
    pub properties: Vec<Property>,
    pub stats: Option<QuickStats>,
}

impl DashboardState {
    /// Ready, but the load failed and no stats could be derived.
    #[must_use]
    pub fn stats_unavailable(&self) -> bool {
        self.phase == DashboardPhase::Ready && self.stats.is_none()
    }

    /// Stats for the cards, with zeros standing in when absent.
    #[must_use]
    pub fn display_stats(&self) -> QuickStats {
        self.stats.unwrap_or_default()
    }

    #[must_use]
    pub fn recent_properties(&self) -> &[Property] {
        let end = self.properties.len().min(RECENT_PROPERTY_LIMIT);
        &self.properties[..end]
    }
}

/// Fetches properties on mount and holds the resulting dashboard state.
pub struct DashboardLoader {
    api: ApiClient,
    state: Mutex<DashboardState>,
}

impl DashboardLoader {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: Mutex::new(DashboardState::default()) }
    }

    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.lock().clone()
    }

    /// Load properties and derive stats. Never fails; errors are logged.
    pub async fn mount(&self) -> DashboardState {
        self.lock().phase = DashboardPhase::Loading;

        let loaded = match self.api.list_properties().await {
            Ok(properties) => {
                let stats = QuickStats::from_properties(&properties);
                tracing::debug!(count = stats.total_properties, "dashboard loaded");
                DashboardState { phase: DashboardPhase::Ready, properties, stats: Some(stats) }
            }
            Err(e) => {
                tracing::error!(error = %e, "dashboard load failed");
                DashboardState { phase: DashboardPhase::Ready, properties: Vec::new(), stats: None }
            }
        };

        *self.lock() = loaded.clone();
        loaded
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DashboardState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
