//! Dashboard page: stat cards, quick actions and recent properties.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered after a successful login navigates to `/dashboard`, and by the
//! `dashboard` command directly. Data comes from `DashboardLoader`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::types::Property;
use crate::state::dashboard::{DashboardPhase, DashboardState};
use crate::util::currency::format_eur;

/// A shortcut into another area of the portfolio app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        title: "New property",
        description: "Add a property to the portfolio",
        route: "/dashboard/properties",
    },
    QuickAction {
        title: "Financial analysis",
        description: "Review financial details and analysis",
        route: "/financial-agent",
    },
    QuickAction {
        title: "Contracts",
        description: "Manage rental contracts",
        route: "/financial-agent/contracts",
    },
    QuickAction {
        title: "Movements",
        description: "Browse financial movements",
        route: "/financial-agent/movements",
    },
];

/// Detail route for a single property.
#[must_use]
pub fn property_detail_route(id: i64) -> String {
    format!("/financial-agent/property/{id}")
}

/// One-line summary of type, rooms and area; empty parts are skipped.
#[must_use]
pub fn property_summary(property: &Property) -> String {
    let mut parts = Vec::new();
    if let Some(kind) = property.property_type.as_deref().filter(|k| !k.is_empty()) {
        parts.push(kind.to_owned());
    }
    if let Some(rooms) = property.rooms.filter(|r| *r > 0) {
        parts.push(format!("{rooms} rooms"));
    }
    if let Some(m2) = property.m2.filter(|m| *m > 0.0) {
        parts.push(format!("{m2}m²"));
    }
    parts.join(" · ")
}

#[must_use]
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut lines = Vec::new();
    if state.phase == DashboardPhase::Loading {
        lines.push("Dashboard".to_owned());
        lines.push("Loading...".to_owned());
        return finish(lines);
    }

    let stats = state.display_stats();
    lines.push("Dashboard: portfolio overview".to_owned());
    lines.push(String::new());
    lines.push(format!("  Properties        {}", stats.total_properties));
    lines.push(format!("  Total value       {}", format_eur(stats.total_value)));
    lines.push(format!("  Monthly income    {}", format_eur(stats.monthly_income)));
    lines.push(format!("  Monthly expenses  {}", format_eur(stats.monthly_expenses)));
    if state.stats_unavailable() {
        lines.push("  (stats unavailable: the property list could not be loaded)".to_owned());
    }

    lines.push(String::new());
    lines.push("Quick actions".to_owned());
    for action in &QUICK_ACTIONS {
        lines.push(format!("  {:<20} {:<40} {}", action.title, action.description, action.route));
    }

    lines.push(String::new());
    lines.push("Recent properties (all: /dashboard/properties)".to_owned());
    let recent = state.recent_properties();
    if recent.is_empty() {
        lines.push("  No properties yet. Start by adding your first property to the portfolio.".to_owned());
    }
    for property in recent {
        lines.push(format!("  {}", property.address));
        let summary = property_summary(property);
        if !summary.is_empty() {
            lines.push(format!("    {summary}"));
        }
        if let Some(price) = property.purchase_price.filter(|p| *p > 0.0) {
            lines.push(format!("    {}", format_eur(price)));
        }
        lines.push(format!("    details: {}", property_detail_route(property.id)));
    }
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
