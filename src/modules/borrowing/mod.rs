pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookfinder_kernel::{InitCtx, Module};
use serde_json::json;

use crate::library::SharedLibrary;

/// Borrow/return workflow and the loan ledger
pub struct BorrowingModule {
    library: SharedLibrary,
}

impl BorrowingModule {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for BorrowingModule {
    fn name(&self) -> &'static str {
        "borrowing"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let policy = self.library.policy();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            loan_period_days = policy.loan_period_days,
            strict_loans = policy.strict,
            "borrowing module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        });
        let record = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BorrowingRecord" }
            }
        });

        Some(json!({
            "paths": {
                "/borrowing-records": {
                    "get": {
                        "summary": "List borrowing records",
                        "tags": ["Borrowing"],
                        "responses": {
                            "200": {
                                "description": "Every loan, open or closed",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/BorrowingRecord" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/borrowing-records/{id}": {
                    "get": {
                        "summary": "Get a borrowing record",
                        "tags": ["Borrowing"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
                        }],
                        "responses": {
                            "200": { "description": "The record", "content": record },
                            "404": { "description": "Record not found", "content": error }
                        }
                    }
                },
                "/borrow": {
                    "post": {
                        "summary": "Borrow a book",
                        "description": "Borrow date is today; due date is today plus the loan period.",
                        "tags": ["Borrowing"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BorrowRequest" }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Loan opened", "content": record },
                            "404": { "description": "Unknown book or member (strict loans)", "content": error },
                            "409": { "description": "No copies available (strict loans)", "content": error }
                        }
                    }
                },
                "/return/{recordId}": {
                    "put": {
                        "summary": "Return a borrowed book",
                        "description": "Stamps today's date as the return date.",
                        "tags": ["Borrowing"],
                        "parameters": [{
                            "name": "recordId",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
                        }],
                        "responses": {
                            "200": { "description": "Loan closed", "content": record },
                            "404": { "description": "Record not found", "content": error },
                            "409": { "description": "Already returned (strict loans)", "content": error }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BorrowingRecord": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "bookId": { "type": "integer", "format": "int64" },
                            "memberId": { "type": "integer", "format": "int64" },
                            "borrowDate": { "type": "string", "format": "date" },
                            "dueDate": { "type": "string", "format": "date" },
                            "returnDate": { "type": ["string", "null"], "format": "date" }
                        },
                        "required": ["id", "bookId", "memberId", "borrowDate", "dueDate"]
                    },
                    "BorrowRequest": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "bookId": { "type": "integer", "format": "int64" },
                            "memberId": { "type": "integer", "format": "int64" }
                        },
                        "required": ["bookId", "memberId"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let open = self
            .library
            .list_records()
            .iter()
            .filter(|record| !record.is_returned())
            .count();
        tracing::info!(module = self.name(), open_loans = open, "borrowing module stopped");
        Ok(())
    }
}

/// Create a new instance of the borrowing module
pub fn create_module(library: SharedLibrary) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BorrowingModule::new(library))
}
