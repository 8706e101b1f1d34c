//! Qdrant backend implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::vectors_config::Config as VectorsConfig;
use qdrant_client::qdrant::{
    CollectionInfo, CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};

use super::QdrantConfig;
use crate::TRACING_TARGET;
use crate::error::{VectorError, VectorResult};
use crate::store::{SearchResult, VectorData, VectorStoreBackend};

/// Qdrant backend implementation.
pub struct QdrantBackend {
    client: Qdrant,
}

impl QdrantBackend {
    /// Creates a new Qdrant backend.
    pub async fn new(config: &QdrantConfig) -> VectorResult<Self> {
        let client = Qdrant::from_url(&config.url)
            .api_key(config.api_key.clone())
            .build()
            .map_err(|e| VectorError::connection(e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %config.url,
            "Connected to Qdrant"
        );

        Ok(Self { client })
    }

    /// Reads the configured dimensionality of an existing collection.
    ///
    /// Returns `None` when the collection uses a vector layout this client
    /// does not inspect (e.g. named vectors).
    async fn collection_dimensions(&self, name: &str) -> VectorResult<Option<usize>> {
        let info = self
            .client
            .collection_info(name)
            .await
            .map_err(|e| VectorError::backend(e.to_string()))?;

        Ok(info.result.and_then(extract_dimensions))
    }
}

#[async_trait]
impl VectorStoreBackend for QdrantBackend {
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> VectorResult<()> {
        if self.collection_exists(name).await? {
            if let Some(existing) = self.collection_dimensions(name).await?
                && existing != dimensions
            {
                return Err(VectorError::dimension_mismatch(existing, dimensions));
            }
            return Ok(());
        }

        let vectors_config =
            VectorsConfig::Params(VectorParamsBuilder::new(dimensions as u64, Distance::Cosine).build());

        let created = self
            .client
            .create_collection(CreateCollectionBuilder::new(name).vectors_config(vectors_config))
            .await;

        if let Err(create_err) = created {
            // A concurrent caller may have created the collection between
            // the existence check and the create call.
            if self.collection_exists(name).await.unwrap_or(false) {
                return Ok(());
            }
            return Err(VectorError::backend(create_err.to_string()));
        }

        tracing::info!(
            target: TRACING_TARGET,
            collection = %name,
            dimensions = %dimensions,
            "Created Qdrant collection"
        );

        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        self.client
            .collection_exists(name)
            .await
            .map_err(|e| VectorError::backend(e.to_string()))
    }

    async fn upsert(&self, collection: &str, vectors: Vec<VectorData>) -> VectorResult<()> {
        if vectors.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = vectors
            .into_iter()
            .map(|v| {
                let payload: HashMap<String, qdrant_client::qdrant::Value> = v
                    .metadata
                    .into_iter()
                    .map(|(k, value)| (k, json_to_qdrant_value(value)))
                    .collect();

                PointStruct::new(v.id, v.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points))
            .await
            .map_err(|e| VectorError::backend(e.to_string()))?;

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

        let request =
            SearchPointsBuilder::new(collection, query, limit as u64).with_payload(true);

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| VectorError::backend(e.to_string()))?;

        let results = response
            .result
            .into_iter()
            .map(|point| {
                let id = extract_point_id(point.id).unwrap_or_default();
                let metadata: HashMap<String, serde_json::Value> = point
                    .payload
                    .into_iter()
                    .map(|(k, value)| (k, qdrant_value_to_json(value)))
                    .collect();

                SearchResult {
                    id,
                    score: point.score,
                    metadata,
                }
            })
            .collect();

        Ok(results)
    }
}

/// Extracts the single-vector dimensionality from collection info.
fn extract_dimensions(info: CollectionInfo) -> Option<usize> {
    let params = info.config?.params?;
    match params.vectors_config?.config? {
        VectorsConfig::Params(vector_params) => Some(vector_params.size as usize),
        _ => None,
    }
}

/// Extracts a point ID as a string.
fn extract_point_id(id: Option<PointId>) -> Option<String> {
    use qdrant_client::qdrant::point_id::PointIdOptions;

    match id?.point_id_options? {
        PointIdOptions::Num(n) => Some(n.to_string()),
        PointIdOptions::Uuid(s) => Some(s),
    }
}

/// Converts a JSON value to a Qdrant payload value.
fn json_to_qdrant_value(value: serde_json::Value) -> qdrant_client::qdrant::Value {
    use qdrant_client::qdrant::value::Kind;

    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Kind::IntegerValue(i)
            } else {
                Kind::DoubleValue(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(qdrant_client::qdrant::ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        serde_json::Value::Object(fields) => Kind::StructValue(qdrant_client::qdrant::Struct {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
        }),
    };

    qdrant_client::qdrant::Value { kind: Some(kind) }
}

/// Converts a Qdrant payload value to a JSON value.
fn qdrant_value_to_json(value: qdrant_client::qdrant::Value) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind;

    match value.kind {
        Some(Kind::NullValue(_)) | None => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::json!(i),
        Some(Kind::DoubleValue(f)) => serde_json::json!(f),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => serde_json::Value::Array(
            list.values.into_iter().map(qdrant_value_to_json).collect(),
        ),
        Some(Kind::StructValue(fields)) => serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_value_to_json(v)))
                .collect(),
        ),
    }
}
