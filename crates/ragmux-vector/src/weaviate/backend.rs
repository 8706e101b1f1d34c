//! Weaviate backend implementation.
//!
//! Talks to Weaviate's REST surface directly: schema calls for collection
//! lifecycle, the batch endpoint for object upsert, and GraphQL `Get` with
//! `nearVector` for similarity search. Collections are created with
//! `vectorizer: none` since embeddings are produced client-side; with that
//! setting Weaviate does not pin a dimensionality in the schema, so
//! dimension conflicts surface at write time, not here.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use super::WeaviateConfig;
use crate::TRACING_TARGET;
use crate::error::{VectorError, VectorResult};
use crate::store::{SearchResult, VectorData, VectorStoreBackend};

/// Weaviate backend implementation.
pub struct WeaviateBackend {
    client: reqwest::Client,
    base_url: String,
}

impl WeaviateBackend {
    /// Creates a new Weaviate backend.
    pub fn new(config: &WeaviateConfig) -> VectorResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| VectorError::invalid_config(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %config.url,
            "Connected to Weaviate"
        );

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl VectorStoreBackend for WeaviateBackend {
    async fn ensure_collection(&self, name: &str, _dimensions: usize) -> VectorResult<()> {
        let class = class_name(name);
        if self.collection_exists(name).await? {
            return Ok(());
        }

        let body = json!({
            "class": class,
            "vectorizer": "none",
            "properties": [
                { "name": "text", "dataType": ["text"] },
            ],
        });

        let response = self
            .client
            .post(self.endpoint("/v1/schema"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                target: TRACING_TARGET,
                collection = %class,
                "Created Weaviate class"
            );
            return Ok(());
        }

        // A concurrent caller may have created the class first.
        if status == StatusCode::UNPROCESSABLE_ENTITY && self.collection_exists(name).await? {
            return Ok(());
        }

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(VectorError::authentication(read_error_body(response).await));
        }
        Err(VectorError::backend(read_error_body(response).await))
    }

    async fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        let class = class_name(name);
        let response = self
            .client
            .get(self.endpoint(&format!("/v1/schema/{class}")))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(VectorError::authentication(read_error_body(response).await))
            }
            _ => Err(VectorError::backend(read_error_body(response).await)),
        }
    }

    async fn upsert(&self, collection: &str, vectors: Vec<VectorData>) -> VectorResult<()> {
        if vectors.is_empty() {
            return Ok(());
        }

        let class = class_name(collection);
        let objects: Vec<serde_json::Value> = vectors
            .into_iter()
            .map(|v| {
                json!({
                    "class": class,
                    "id": v.id,
                    "properties": v.metadata,
                    "vector": v.vector,
                })
            })
            .collect();

        let response = self
            .client
            .post(self.endpoint("/v1/batch/objects"))
            .json(&json!({ "objects": objects }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VectorError::backend(read_error_body(response).await));
        }

        let results: Vec<BatchObjectStatus> = response.json().await?;
        for object in results {
            if let Some(result) = object.result
                && result.status.as_deref() == Some("FAILED")
            {
                let detail = result
                    .errors
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "batch object rejected".to_owned());
                return Err(VectorError::backend(detail));
            }
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: usize,
    ) -> VectorResult<Vec<SearchResult>> {
        if !self.collection_exists(collection).await? {
            return Err(VectorError::collection_not_found(collection));
        }

        let class = class_name(collection);
        let graphql = near_vector_query(&class, &query, limit)?;

        let response = self
            .client
            .post(self.endpoint("/v1/graphql"))
            .json(&json!({ "query": graphql }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VectorError::backend(read_error_body(response).await));
        }

        let body: GraphQlResponse = response.json().await?;
        parse_search_response(body, &class)
    }
}

/// Normalizes a collection name into a Weaviate class name.
///
/// Weaviate capitalizes the first letter of class names on creation;
/// applying the same normalization keeps lookups consistent.
fn class_name(collection: &str) -> String {
    let mut chars = collection.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the GraphQL `Get` query for a nearest-neighbor search.
fn near_vector_query(class: &str, query: &[f32], limit: usize) -> VectorResult<String> {
    let vector = serde_json::to_string(query)?;
    Ok(format!(
        "{{ Get {{ {class}(limit: {limit}, nearVector: {{vector: {vector}}}) \
         {{ text _additional {{ id certainty }} }} }} }}"
    ))
}

/// Converts a GraphQL response into ranked search results.
fn parse_search_response(body: GraphQlResponse, class: &str) -> VectorResult<Vec<SearchResult>> {
    if let Some(errors) = body.errors
        && let Some(first) = errors.first()
    {
        return Err(VectorError::backend(first.message.clone()));
    }

    let objects = body
        .data
        .and_then(|mut data| data.get.remove(class))
        .unwrap_or_default();

    let results = objects
        .into_iter()
        .map(|object| {
            let additional = object.additional.unwrap_or_default();
            let mut metadata = HashMap::new();
            if let Some(text) = object.text {
                metadata.insert("text".to_owned(), serde_json::Value::String(text));
            }

            SearchResult {
                id: additional.id.unwrap_or_default(),
                score: additional.certainty.unwrap_or_default() as f32,
                metadata,
            }
        })
        .collect();

    Ok(results)
}

/// Reads the response body for error reporting.
async fn read_error_body(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.is_empty() => format!("{status}: {body}"),
        _ => status.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    #[serde(rename = "Get")]
    get: HashMap<String, Vec<RetrievedObject>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RetrievedObject {
    text: Option<String>,
    #[serde(rename = "_additional")]
    additional: Option<Additional>,
}

#[derive(Debug, Default, Deserialize)]
struct Additional {
    id: Option<String>,
    certainty: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BatchObjectStatus {
    result: Option<BatchResult>,
}

#[derive(Debug, Deserialize)]
struct BatchResult {
    status: Option<String>,
    errors: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_capitalized() {
        assert_eq!(class_name("articles"), "Articles");
        assert_eq!(class_name("Articles"), "Articles");
        assert_eq!(class_name(""), "");
    }

    #[test]
    fn near_vector_query_embeds_vector_and_limit() {
        let query = near_vector_query("Articles", &[0.5, -0.25], 3).unwrap();

        assert!(query.contains("Articles(limit: 3"));
        assert!(query.contains("nearVector: {vector: [0.5,-0.25]}"));
        assert!(query.contains("_additional { id certainty }"));
    }

    #[test]
    fn search_response_parses_ranked_objects() {
        let body: GraphQlResponse = serde_json::from_value(serde_json::json!({
            "data": {
                "Get": {
                    "Articles": [
                        {
                            "text": "hello world",
                            "_additional": {
                                "id": "7c9f3b52-2f10-4c6e-9a56-bd3b0c6b2a41",
                                "certainty": 0.97,
                            },
                        },
                        {
                            "text": "second",
                            "_additional": {
                                "id": "11d7a1f7-48cb-4b6a-8a32-fb5a5f9c2f55",
                                "certainty": 0.61,
                            },
                        },
                    ],
                },
            },
        }))
        .unwrap();

        let results = parse_search_response(body, "Articles").unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text(), Some("hello world"));
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn graphql_errors_surface_as_backend_errors() {
        let body: GraphQlResponse = serde_json::from_value(serde_json::json!({
            "errors": [ { "message": "Cannot query field" } ],
        }))
        .unwrap();

        let err = parse_search_response(body, "Articles").unwrap_err();
        assert!(matches!(err, VectorError::Backend(_)));
    }
}
