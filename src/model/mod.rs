mod onnx;

pub use onnx::OnnxRegressor;

use crate::{
    Error, Result,
    config::ModelConfig,
    features::{self, ColumnSchema, FeatureVector, PenguinRecord},
};
use tracing::{debug, info};

/// A pre-trained regressor operating on rows in schema order.
pub trait Regressor: Send + Sync {
    fn kind(&self) -> &'static str;

    fn n_features(&self) -> usize;

    fn predict(&self, row: &FeatureVector) -> Result<f64>;
}

/// The regressor together with the column schema it was trained on.
pub struct LoadedModel {
    regressor: Box<dyn Regressor>,
    schema: ColumnSchema,
}

impl LoadedModel {
    pub fn new(regressor: Box<dyn Regressor>, schema: ColumnSchema) -> Result<Self> {
        if regressor.n_features() != schema.len() {
            return Err(Error::schema(format!(
                "model expects {} features but the schema has {} columns",
                regressor.n_features(),
                schema.len()
            )));
        }
        Ok(Self { regressor, schema })
    }

    pub fn kind(&self) -> &'static str {
        self.regressor.kind()
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Encodes, aligns and regresses a single record.
    pub fn predict(&self, record: &PenguinRecord) -> Result<f64> {
        let encoded = features::encode(record);
        let alignment = self.schema.align(&encoded);

        if !alignment.dropped.is_empty() {
            debug!(
                "Columns not present at training time were zero-filled: {:?}",
                alignment.dropped
            );
        }

        self.regressor.predict(&alignment.features)
    }
}

/// Reads the column artifact, then the ONNX graph sized to that schema.
pub async fn load(config: &ModelConfig) -> Result<LoadedModel> {
    debug!(
        "Loading model from {} with columns from {}",
        config.model_path, config.columns_path
    );

    let columns_json = tokio::fs::read_to_string(&config.columns_path)
        .await
        .map_err(|e| Error::model_load(&config.columns_path, e))?;
    let schema = ColumnSchema::from_json(&columns_json).map_err(|e| match e {
        Error::Serialization(e) => Error::model_load(&config.columns_path, e),
        other => other,
    })?;

    // Graph parsing and optimisation are blocking work.
    let model_path = config.model_path.clone();
    let n_features = schema.len();
    let regressor =
        tokio::task::spawn_blocking(move || OnnxRegressor::load(model_path, n_features)).await??;

    let model = LoadedModel::new(Box::new(regressor), schema)?;

    info!(
        "Loaded {} model with {} feature columns",
        model.kind(),
        model.schema().len()
    );

    Ok(model)
}
