//! Tests for the tool system.

use pondwire::tools::{FnTool, Tool, ToolArguments, ToolParameters, ToolRegistry};

#[test]
fn parameter_builder_constructs_strict_schema() {
    let params = ToolParameters::object()
        .string("sku", "SKU id", true)
        .number("limit", "Max results", false)
        .boolean("verbose", "Enable verbose output", false)
        .build();

    let schema = &params.schema;
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["sku"]["type"], "string");
    assert_eq!(schema["properties"]["limit"]["type"], "number");
    assert_eq!(schema["properties"]["verbose"]["type"], "boolean");
    assert_eq!(schema["required"].as_array().unwrap().len(), 1);
    assert_eq!(schema["additionalProperties"], false);
}

#[test]
fn empty_parameters_are_still_strict() {
    let params = ToolParameters::empty();
    assert_eq!(params.schema["type"], "object");
    assert_eq!(params.schema["additionalProperties"], false);
}

#[test]
fn tool_arguments_get_str() {
    let args = ToolArguments::new(serde_json::json!({"sku": "sku-x"}));
    assert_eq!(args.get_str("sku").unwrap(), "sku-x");
    assert!(args.get_str("missing").is_err());
}

#[test]
fn tool_arguments_optional() {
    let args = ToolArguments::new(serde_json::json!({"sku": "sku-x"}));
    assert_eq!(args.get_str_opt("sku"), Some("sku-x"));
    assert_eq!(args.get_str_opt("missing"), None);
}

#[test]
fn tool_arguments_from_json_rejects_malformed_input() {
    assert!(ToolArguments::from_json("{not json").is_err());
    assert!(ToolArguments::from_json(r#""a string""#).is_err());
    assert!(ToolArguments::from_json(r#"{"sku":"x"}"#).is_ok());
}

#[test]
fn tool_arguments_deserialize() {
    #[derive(serde::Deserialize, PartialEq, Debug)]
    struct Params {
        sku: String,
        limit: Option<u32>,
    }

    let args = ToolArguments::new(serde_json::json!({"sku": "sku-x", "limit": 10}));
    let params: Params = args.deserialize().unwrap();
    assert_eq!(params.sku, "sku-x");
    assert_eq!(params.limit, Some(10));
}

#[tokio::test]
async fn fn_tool_executes() {
    let tool = FnTool::new(
        "greet",
        "Greet a person",
        ToolParameters::object().string("name", "Name", true).build(),
        |args| async move {
            let name = args.get_str("name")?;
            Ok(serde_json::json!({"greeting": format!("Hello, {name}!")}))
        },
    );

    assert_eq!(tool.name(), "greet");
    assert_eq!(tool.description(), "Greet a person");

    let args = ToolArguments::new(serde_json::json!({"name": "World"}));
    let result = tool.execute(&args).await.unwrap();
    assert_eq!(result["greeting"], "Hello, World!");
}

#[test]
fn registry_preserves_declaration_order() {
    let registry = ToolRegistry::new()
        .with(FnTool::new(
            "alpha",
            "First tool",
            ToolParameters::empty(),
            |_| async move { Ok(serde_json::json!({})) },
        ))
        .with(FnTool::new(
            "beta",
            "Second tool",
            ToolParameters::empty(),
            |_| async move { Ok(serde_json::json!({})) },
        ));

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("alpha"));
    assert!(registry.contains("beta"));
    assert!(!registry.contains("gamma"));

    let declarations = registry.declarations();
    assert_eq!(declarations[0].name, "alpha");
    assert_eq!(declarations[1].name, "beta");
    assert_eq!(declarations[0].kind, "function");
    assert!(declarations[0].strict);
}

#[test]
fn registry_lookup_returns_the_named_tool() {
    let registry = ToolRegistry::new().with(FnTool::new(
        "alpha",
        "First tool",
        ToolParameters::empty(),
        |_| async move { Ok(serde_json::json!({})) },
    ));

    assert_eq!(registry.get("alpha").unwrap().name(), "alpha");
    assert!(registry.get("missing").is_none());
}
