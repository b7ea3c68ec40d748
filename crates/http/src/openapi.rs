//! OpenAPI document assembly from module fragments

use serde_json::{json, Value};

use bookfinder_kernel::ModuleRegistry;

/// Prefix every module path is mounted under
pub const API_PREFIX: &str = "/api";

/// Build the merged OpenAPI document for all registered modules
pub fn merged_spec(registry: &ModuleRegistry) -> Value {
    let mut spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "BookFinder API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Books, members and borrowing records"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    spec["components"]["schemas"]["ErrorResponse"] = json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                spec["paths"][format!("{API_PREFIX}{path}")] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
        {
            for (name, schema) in schemas {
                spec["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    spec
}

/// Convert the merged JSON into utoipa's model for Swagger UI, falling back to
/// a bare document if the JSON does not fit the model.
pub fn to_utoipa(spec: &Value) -> utoipa::openapi::OpenApi {
    serde_json::from_value(spec.clone()).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "merged OpenAPI document rejected by utoipa; serving stub");
        utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title("BookFinder API")
                    .version(env!("CARGO_PKG_VERSION"))
                    .build(),
            )
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookfinder_kernel::Module;
    use std::sync::Arc;

    struct ShelvesModule;

    #[async_trait]
    impl Module for ShelvesModule {
        fn name(&self) -> &'static str {
            "shelves"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": { "/shelves": { "get": { "summary": "List shelves" } } },
                "components": { "schemas": { "Shelf": { "type": "object" } } }
            }))
        }
    }

    #[test]
    fn module_paths_are_prefixed_and_schemas_merged() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(ShelvesModule)).unwrap();

        let spec = merged_spec(&registry);
        assert_eq!(spec["paths"]["/api/shelves"]["get"]["summary"], "List shelves");
        assert!(spec["paths"]["/healthz"].is_object());
        assert!(spec["components"]["schemas"]["Shelf"].is_object());
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
