//! API documentation handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::{Value, json};

use crate::domain::entities::DEFAULT_TLD;
use crate::state::AppState;

/// Template for the API documentation page.
///
/// Renders `templates/docs.html` with the limits this instance enforces.
#[derive(Template, WebTemplate)]
#[template(path = "docs.html")]
pub struct DocsTemplate {
    pub version: &'static str,
    pub default_tld: &'static str,
    pub max_bulk_domains: usize,
    /// `None` when rate limiting is disabled.
    pub limits: Option<LimitsView>,
}

pub struct LimitsView {
    pub single: String,
    pub bulk: String,
    pub daily: String,
}

/// Renders the documentation page.
///
/// # Endpoint
///
/// `GET /docs`
pub async fn docs_handler(State(state): State<AppState>) -> impl IntoResponse {
    DocsTemplate {
        version: env!("CARGO_PKG_VERSION"),
        default_tld: DEFAULT_TLD,
        max_bulk_domains: state.bulk.max_count(),
        limits: state.limiter.limits().map(|limits| LimitsView {
            single: limits.single.to_string(),
            bulk: limits.bulk.to_string(),
            daily: limits.daily.to_string(),
        }),
    }
}

/// Serves the OpenAPI 3.0.3 document.
///
/// # Endpoint
///
/// `GET /openapi.json`
pub async fn openapi_handler(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(state.bulk.max_count()))
}

/// Builds the OpenAPI document for all public endpoints.
pub fn openapi_document(max_bulk_domains: usize) -> Value {
    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Domain Check API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Checks domain availability by reconciling WHOIS and DNS lookups",
            "license": { "name": "MIT", "url": "https://opensource.org/licenses/MIT" }
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Check domain availability",
                    "parameters": [
                        {
                            "name": "domain",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "tld",
                            "in": "query",
                            "schema": { "type": "string", "default": DEFAULT_TLD }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Domain check successful",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/DomainCheckResponse" }
                                }
                            }
                        },
                        "400": error_response("Invalid request"),
                        "429": error_response("Rate limit exceeded")
                    }
                }
            },
            "/bulk": {
                "post": {
                    "summary": "Check several labels under one TLD",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BulkCheckRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Results in input order",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "results": {
                                                "type": "array",
                                                "items": { "$ref": "#/components/schemas/DomainCheckResponse" }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        "400": error_response("Invalid request"),
                        "429": error_response("Rate limit exceeded")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            },
            "/metrics": {
                "get": {
                    "summary": "Uptime, cache statistics and rate limits",
                    "responses": {
                        "200": {
                            "description": "Current metrics",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/MetricsResponse" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ProbeResult": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "enum": ["available", "taken", "error"] },
                        "error": { "type": "string" }
                    }
                },
                "DomainCheckResponse": {
                    "type": "object",
                    "properties": {
                        "domain": { "type": "string", "example": "example.com" },
                        "status": { "type": "string", "enum": ["available", "taken"] },
                        "whois": {
                            "allOf": [{ "$ref": "#/components/schemas/ProbeResult" }],
                            "properties": {
                                "details": {
                                    "type": "object",
                                    "properties": {
                                        "registrar": { "type": "string", "nullable": true },
                                        "expiration_date": { "type": "string", "nullable": true }
                                    }
                                }
                            }
                        },
                        "dns": {
                            "allOf": [{ "$ref": "#/components/schemas/ProbeResult" }],
                            "properties": {
                                "records": { "type": "array", "items": { "type": "string" } }
                            }
                        },
                        "tld": { "type": "string", "example": DEFAULT_TLD },
                        "response_time": { "type": "string", "example": "0.45s" },
                        "cached": { "type": "boolean" }
                    }
                },
                "BulkCheckRequest": {
                    "type": "object",
                    "required": ["domains"],
                    "properties": {
                        "domains": {
                            "type": "array",
                            "maxItems": max_bulk_domains,
                            "items": { "type": "string" },
                            "example": ["example", "test"]
                        },
                        "tld": { "type": "string", "default": DEFAULT_TLD }
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string", "example": "Invalid request" },
                        "message": { "type": "string", "example": "Invalid domain name format" }
                    }
                },
                "MetricsResponse": {
                    "type": "object",
                    "properties": {
                        "uptime": { "type": "string", "example": "1d 2h 34m" },
                        "cache_stats": { "type": "object" },
                        "rate_limits": { "type": "object" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_endpoints() {
        let doc = openapi_document(10);

        assert_eq!(doc["openapi"], "3.0.3");
        for path in ["/", "/bulk", "/health", "/metrics"] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
        assert_eq!(
            doc["components"]["schemas"]["BulkCheckRequest"]["properties"]["domains"]["maxItems"],
            10
        );
    }

    #[test]
    fn test_docs_template_renders_limits() {
        let page = DocsTemplate {
            version: "0.1.0",
            default_tld: DEFAULT_TLD,
            max_bulk_domains: 7,
            limits: Some(LimitsView {
                single: "10 per minute".to_string(),
                bulk: "5 per minute".to_string(),
                daily: "100 per day".to_string(),
            }),
        }
        .render()
        .unwrap();

        assert!(page.contains("10 per minute"));
        assert!(page.contains("Maximum 7 domains"));
    }
}
