pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookfinder_kernel::{InitCtx, Module};
use serde_json::json;

use crate::library::SharedLibrary;

/// Catalogue CRUD over the shared library
pub struct BooksModule {
    library: SharedLibrary,
}

impl BooksModule {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.library.list_books().len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Book not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let book = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        });
        let book_input = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookInput" }
                }
            }
        });
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
        });

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book in the catalogue",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": book_input,
                        "responses": {
                            "201": { "description": "Book created", "content": book }
                        }
                    }
                },
                "/books/by-title/{title}": {
                    "get": {
                        "summary": "Find a book by exact title",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "title",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": { "description": "First book with that title", "content": book },
                            "404": not_found
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "200": { "description": "The book", "content": book },
                            "404": not_found
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "requestBody": book_input,
                        "responses": {
                            "200": { "description": "Book replaced", "content": book },
                            "404": not_found
                        }
                    },
                    "delete": {
                        "summary": "Remove a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "204": { "description": "Book removed" },
                            "404": not_found
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "publicationYear": { "type": "integer", "format": "int32" },
                            "genre": { "type": "string" },
                            "availableCopies": {
                                "type": "integer",
                                "format": "int32",
                                "description": "Copies on the shelf; negative when over-lent"
                            }
                        },
                        "required": ["id", "title", "author", "publicationYear", "genre", "availableCopies"]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Assigned by the server when omitted; ignored on replace"
                            },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "publicationYear": { "type": "integer", "format": "int32" },
                            "genre": { "type": "string" },
                            "availableCopies": { "type": "integer", "format": "int32" }
                        }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.library.list_books().len(),
            "books module stopped; catalogue discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(library: SharedLibrary) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(library))
}
