//! Pond-inventory demo: three SKU lookup tools and a scripted session.

use serde_json::json;

use crate::session::TurnScript;
use crate::tools::{FnTool, ToolParameters, ToolRegistry};

fn sku_parameters() -> ToolParameters {
    ToolParameters::object()
        .string(
            "sku",
            "Stock-keeping unit identifier, such as sku-froge-lily-pad-deluxe.",
            true,
        )
        .build()
}

/// Registry with the three demo lookup tools, each returning fixed records
/// keyed by the requested SKU.
pub fn inventory_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with(FnTool::new(
            "get_sku_inventory",
            "Return froge pond inventory details for a SKU.",
            sku_parameters(),
            |args| async move {
                let sku = args.get_str("sku")?;
                Ok(json!({
                    "sku": sku,
                    "warehouse": "pond-west-1",
                    "on_hand_units": 84,
                    "reserved_units": 26,
                    "reorder_point": 60,
                    "safety_stock": 40,
                }))
            },
        ))
        .with(FnTool::new(
            "get_supplier_eta",
            "Return tadpole supplier restock ETA data for a SKU.",
            sku_parameters(),
            |args| async move {
                let sku = args.get_str("sku")?;
                Ok(json!({
                    "sku": sku,
                    "supplier_shipments": [
                        {
                            "shipment_id": "frog_ship_2201",
                            "eta_date": "2026-02-24",
                            "quantity": 180,
                            "risk": "low",
                        },
                        {
                            "shipment_id": "frog_ship_2205",
                            "eta_date": "2026-03-03",
                            "quantity": 220,
                            "risk": "medium",
                        },
                    ],
                }))
            },
        ))
        .with(FnTool::new(
            "get_quality_alerts",
            "Return recent froge quality alerts for a SKU.",
            sku_parameters(),
            |args| async move {
                let sku = args.get_str("sku")?;
                Ok(json!({
                    "sku": sku,
                    "alerts": [
                        {
                            "alert_id": "frog_qa_781",
                            "status": "open",
                            "severity": "high",
                            "summary": "Lily-pad coating chipping in lot LP-42",
                        },
                        {
                            "alert_id": "frog_qa_795",
                            "status": "in_progress",
                            "severity": "medium",
                            "summary": "Pond-crate scuff rate above threshold",
                        },
                        {
                            "alert_id": "frog_qa_802",
                            "status": "resolved",
                            "severity": "low",
                            "summary": "Froge label alignment issue corrected",
                        },
                    ],
                }))
            },
        ))
}

/// The scripted demo turns, each steering the server to a different tool.
pub fn demo_turns() -> Vec<TurnScript> {
    vec![
        TurnScript::new(
            "Use get_sku_inventory for sku='sku-froge-lily-pad-deluxe' and summarize \
             current pond stock health in one sentence.",
            "get_sku_inventory",
        ),
        TurnScript::new(
            "Now use get_supplier_eta for the same SKU and summarize restock ETA and \
             tadpole shipment risk.",
            "get_supplier_eta",
        ),
        TurnScript::new(
            "Finally use get_quality_alerts for the same SKU and summarize unresolved \
             froge quality concerns in one short paragraph.",
            "get_quality_alerts",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_declares_three_strict_tools() {
        let registry = inventory_registry();
        let declarations = registry.declarations();

        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations[0].name, "get_sku_inventory");
        assert_eq!(declarations[1].name, "get_supplier_eta");
        assert_eq!(declarations[2].name, "get_quality_alerts");
        for declaration in &declarations {
            assert_eq!(declaration.kind, "function");
            assert!(declaration.strict);
            assert_eq!(declaration.parameters["additionalProperties"], false);
            assert_eq!(declaration.parameters["required"][0], "sku");
        }
    }

    #[test]
    fn demo_turns_match_declared_tools() {
        let registry = inventory_registry();
        for turn in demo_turns() {
            assert!(registry.contains(&turn.tool_name));
        }
    }

    #[tokio::test]
    async fn inventory_tool_echoes_requested_sku() {
        let registry = inventory_registry();
        let tool = registry.get("get_sku_inventory").unwrap();
        let args = crate::tools::ToolArguments::new(serde_json::json!({"sku": "sku-x"}));

        let output = tool.execute(&args).await.unwrap();

        assert_eq!(output["sku"], "sku-x");
        assert_eq!(output["warehouse"], "pond-west-1");
    }
}
