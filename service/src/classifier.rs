use ppgcore::inference::{Window, WindowClassifier};
use ppgcore::prelude::{PipelineError, PipelineResult};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Client for the external AF model, speaking TensorFlow-Serving style JSON.
/// The batch is posted as `instances` shaped windows x samples x 1, matching
/// the layout the LSTM was exported with.
pub struct RemoteClassifier {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f64>>,
}

impl RemoteClassifier {
    pub fn new(base_url: impl Into<String>) -> PipelineResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| {
                PipelineError::ModelUnavailable(format!("building HTTP client: {}", err))
            })?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

impl WindowClassifier for RemoteClassifier {
    fn ready(&self) -> PipelineResult<()> {
        let response = self.client.get(&self.base_url).send().map_err(|err| {
            PipelineError::ModelUnavailable(format!("model endpoint {}: {}", self.base_url, err))
        })?;
        if !response.status().is_success() {
            return Err(PipelineError::ModelUnavailable(format!(
                "model endpoint {} answered {}",
                self.base_url,
                response.status()
            )));
        }
        Ok(())
    }

    fn classify(&self, batch: &[Window]) -> PipelineResult<Vec<f64>> {
        let instances: Vec<Vec<[f64; 1]>> = batch
            .iter()
            .map(|window| window.samples.iter().map(|&v| [v]).collect())
            .collect();
        let response = self
            .client
            .post(format!("{}:predict", self.base_url))
            .json(&json!({ "instances": instances }))
            .send()
            .map_err(|err| {
                PipelineError::ModelUnavailable(format!(
                    "model endpoint {}: {}",
                    self.base_url, err
                ))
            })?;
        if !response.status().is_success() {
            return Err(PipelineError::ModelUnavailable(format!(
                "prediction call answered {}",
                response.status()
            )));
        }
        let decoded: PredictResponse = response.json().map_err(|err| {
            PipelineError::ModelUnavailable(format!("decoding prediction response: {}", err))
        })?;
        decoded
            .predictions
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                row.into_iter().next().ok_or_else(|| {
                    PipelineError::Internal(format!("empty prediction row for window {}", index))
                })
            })
            .collect()
    }
}
