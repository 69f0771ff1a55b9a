use super::Regressor;
use crate::{Error, Result, features::FeatureVector};
use std::path::Path;
use tract_onnx::prelude::*;
use tract_onnx::tract_hir::infer::Factoid;
use tract_onnx::tract_core::internal::DimLike;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A single-output ONNX regression graph taking one `f32 [1, n]` row.
pub struct OnnxRegressor {
    plan: Plan,
    n_features: usize,
}

impl OnnxRegressor {
    /// Loads the graph and pins its input to `[1, n_features]`.
    pub fn load<P: AsRef<Path>>(model_path: P, n_features: usize) -> Result<Self> {
        let path = model_path.as_ref().display().to_string();

        let model = tract_onnx::onnx()
            .model_for_path(model_path.as_ref())
            .map_err(|e| Error::model_load(&path, e))?;

        // The batch axis is usually symbolic; the feature axis is concrete.
        let declared = model
            .input_fact(0)
            .ok()
            .and_then(|fact| fact.shape.dims().nth(1).and_then(|d| d.concretize()))
            .and_then(|d| d.to_usize().ok());
        if let Some(declared) = declared {
            if declared != n_features {
                return Err(Error::schema(format!(
                    "model input has {} features but the schema has {} columns",
                    declared, n_features
                )));
            }
        }

        let plan = model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, n_features)),
            )
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| Error::model_load(&path, e))?;

        let regressor = Self { plan, n_features };

        // A zero row must yield exactly one value.
        regressor
            .predict(&FeatureVector::new(vec![0.0; n_features]))
            .map_err(|e| Error::model_load(&path, e))?;

        Ok(regressor)
    }
}

impl Regressor for OnnxRegressor {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, row: &FeatureVector) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(Error::inference(format!(
                "expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }

        let values: Vec<f32> = row.values().iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, self.n_features], values.as_slice())
            .map_err(|e| Error::inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| Error::inference(e.to_string()))?;
        let output = outputs
            .first()
            .ok_or_else(|| Error::inference("model produced no outputs"))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| Error::inference(e.to_string()))?;

        if view.len() != 1 {
            return Err(Error::inference(format!(
                "expected a single prediction, got {} values",
                view.len()
            )));
        }
        view.iter()
            .next()
            .map(|&y| y as f64)
            .ok_or_else(|| Error::inference("model produced an empty output"))
    }
}
