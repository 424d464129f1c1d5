//! Static fallback catalog for CMS-backed marketing models.
//!
//! When the CMS is unreachable the site must still render something, so the
//! shipped copy for the `service` and `product` models lives here. The
//! fallback is only used on fetch *failure* — an empty 2xx result is a valid
//! answer and renders as empty.

use serde_json::{Map, Value, json};

use crate::model::ContentItem;

/// The static entries for a model, or `None` when the model has no shipped
/// fallback and an upstream failure must surface to the caller.
#[must_use]
pub fn fallback_entries(model: &str) -> Option<Vec<ContentItem>> {
    match model {
        "service" => Some(fallback_services()),
        "product" => Some(fallback_products()),
        _ => None,
    }
}

fn item(id: &str, name: &str, data: Value) -> ContentItem {
    let data = match data {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ContentItem {
        id: id.to_owned(),
        name: Some(name.to_owned()),
        data,
        meta: None,
    }
}

fn fallback_services() -> Vec<ContentItem> {
    vec![
        item(
            "fallback-service-migration",
            "Zero-Downtime Migration",
            json!({
                "title": "Zero-Downtime Migration",
                "description": "Move workloads between platforms without stopping the business. We plan, rehearse, and execute cutovers measured in seconds, not weekends.",
                "features": ["Cutover rehearsals", "Rollback plans", "Traffic shadowing"],
                "order": 1
            }),
        ),
        item(
            "fallback-service-platform",
            "Platform Engineering",
            json!({
                "title": "Platform Engineering",
                "description": "Internal developer platforms that make the right way the easy way: golden paths, paved-road CI/CD, and self-service infrastructure.",
                "features": ["Golden paths", "Self-service environments", "Deployment automation"],
                "order": 2
            }),
        ),
        item(
            "fallback-service-modernization",
            "Legacy Modernization",
            json!({
                "title": "Legacy Modernization",
                "description": "Incremental strangler-fig rewrites that keep the old system earning while the new one grows around it.",
                "features": ["Strangler-fig rollouts", "Contract testing", "Risk-scored slicing"],
                "order": 3
            }),
        ),
        item(
            "fallback-service-reliability",
            "Reliability Engineering",
            json!({
                "title": "Reliability Engineering",
                "description": "SLOs that mean something, on-call that people can live with, and incident reviews that actually change the system.",
                "features": ["SLO design", "Incident response", "Chaos drills"],
                "order": 4
            }),
        ),
    ]
}

fn fallback_products() -> Vec<ContentItem> {
    vec![
        item(
            "fallback-product-shiftboard",
            "Shiftboard",
            json!({
                "title": "Shiftboard",
                "description": "A migration control plane: inventory, dependency graph, and cutover checklists for every workload in flight.",
                "order": 1
            }),
        ),
        item(
            "fallback-product-shiftgate",
            "Shiftgate",
            json!({
                "title": "Shiftgate",
                "description": "Progressive delivery gateway — shadow traffic, compare responses, and promote the new stack one percent at a time.",
                "order": 2
            }),
        ),
    ]
}
