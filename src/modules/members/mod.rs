pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookfinder_kernel::{InitCtx, Module};
use serde_json::json;

use crate::library::SharedLibrary;

/// Member CRUD over the shared library
pub struct MembersModule {
    library: SharedLibrary,
}

impl MembersModule {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for MembersModule {
    fn name(&self) -> &'static str {
        "members"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "members module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Member not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let member = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Member" }
            }
        });
        let member_input = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/MemberInput" }
                }
            }
        });
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
        });
        let member_properties = json!({
            "name": { "type": "string" },
            "email": { "type": "string", "format": "email" },
            "phoneNumber": { "type": ["string", "null"] },
            "startDate": { "type": ["string", "null"], "format": "date" },
            "endDate": { "type": ["string", "null"], "format": "date" }
        });

        let mut member_schema = member_properties.clone();
        member_schema["id"] = json!({ "type": "integer", "format": "int64" });
        let mut input_schema = member_properties;
        input_schema["id"] = json!({
            "type": "integer",
            "format": "int64",
            "description": "Assigned by the server when omitted; ignored on replace"
        });

        Some(json!({
            "paths": {
                "/members": {
                    "get": {
                        "summary": "List members",
                        "tags": ["Members"],
                        "responses": {
                            "200": {
                                "description": "Every registered member",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Member" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Register a member",
                        "tags": ["Members"],
                        "requestBody": member_input,
                        "responses": {
                            "201": { "description": "Member created", "content": member }
                        }
                    }
                },
                "/members/{id}": {
                    "get": {
                        "summary": "Get a member",
                        "tags": ["Members"],
                        "parameters": [id_param],
                        "responses": {
                            "200": { "description": "The member", "content": member },
                            "404": not_found
                        }
                    },
                    "put": {
                        "summary": "Replace a member",
                        "tags": ["Members"],
                        "parameters": [id_param],
                        "requestBody": member_input,
                        "responses": {
                            "200": { "description": "Member replaced", "content": member },
                            "404": not_found
                        }
                    },
                    "delete": {
                        "summary": "Remove a member",
                        "tags": ["Members"],
                        "parameters": [id_param],
                        "responses": {
                            "204": { "description": "Member removed" },
                            "404": not_found
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Member": {
                        "type": "object",
                        "properties": member_schema,
                        "required": ["id", "name", "email"]
                    },
                    "MemberInput": {
                        "type": "object",
                        "properties": input_schema
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "members module stopped");
        Ok(())
    }
}

/// Create a new instance of the members module
pub fn create_module(library: SharedLibrary) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(MembersModule::new(library))
}
