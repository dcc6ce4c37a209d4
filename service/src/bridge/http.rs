use crate::bridge::model::ResultModel;
use crate::export::render_predictions_csv;
use crate::workflow::runner::Runner;
use ppgcore::telemetry::MetricsRecorder;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

#[derive(Debug)]
struct BridgeError;

impl warp::reject::Reject for BridgeError {}

/// Signal payload accepted by the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalPayload {
    pub samples: Vec<f64>,
}

/// Builds the upload-predict-download routes over shared bridge state.
fn routes(
    state: Arc<RwLock<ResultModel>>,
    metrics: Arc<MetricsRecorder>,
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_for_filter = state;
    let metrics_for_filter = metrics;
    let state_filter = warp::any().map(move || state_for_filter.clone());
    let metrics_filter = warp::any().map(move || metrics_for_filter.clone());
    let runner_filter = warp::any().map(move || runner.clone());

    let summary_route = warp::path("summary")
        .and(warp::get())
        .and(state_filter.clone())
        .and(metrics_filter.clone())
        .map(
            |state: Arc<RwLock<ResultModel>>, metrics: Arc<MetricsRecorder>| {
                let (requests, windows, errors) = metrics.snapshot();
                let model = state.read().unwrap().clone();
                warp::reply::json(&json!({
                    "summary": model.summary,
                    "repaired_samples": model.repaired_samples,
                    "requests": requests,
                    "windows": windows,
                    "errors": errors,
                }))
            },
        );

    let download_route = warp::path("predictions")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: Arc<RwLock<ResultModel>>| {
            let model = state.read().unwrap().clone();
            warp::reply::with_header(
                render_predictions_csv(&model.predictions),
                "content-type",
                "text/csv",
            )
        });

    let classify_route = warp::path("classify")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter)
        .and(metrics_filter)
        .and(runner_filter)
        .and_then(
            |payload: SignalPayload,
             state: Arc<RwLock<ResultModel>>,
             metrics: Arc<MetricsRecorder>,
             runner: Arc<Runner>| async move {
                // The model client blocks on HTTP, so the pipeline must run
                // off the runtime thread.
                let samples = payload.samples;
                let result = tokio::task::spawn_blocking(move || runner.execute(&samples))
                    .await
                    .map_err(|_| warp::reject::custom(BridgeError))?;
                match result {
                    Ok(outcome) => {
                        metrics.record_request(outcome.summary.window_count);
                        let mut guard = state.write().unwrap();
                        *guard = ResultModel {
                            summary: outcome.summary,
                            predictions: outcome.predictions,
                            repaired_samples: outcome.repaired_samples,
                        };
                        Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "ok",
                                "summary": guard.summary.clone(),
                            })),
                            StatusCode::OK,
                        ))
                    }
                    Err(err) => {
                        metrics.record_error();
                        eprintln!("classify error: {:#}", err);
                        Err(warp::reject::custom(BridgeError))
                    }
                }
            },
        );

    summary_route.or(download_route).or(classify_route)
}

/// Bridge hosting the upload-predict-download endpoints. Each request runs
/// its own pipeline; only the latest result model sits behind a lock.
pub struct ResultBridge {
    state: Arc<RwLock<ResultModel>>,
    metrics: Arc<MetricsRecorder>,
}

impl ResultBridge {
    pub fn new(runner: Arc<Runner>, address: SocketAddr) -> Self {
        let bridge = Self::detached();
        let filter = routes(bridge.state.clone(), bridge.metrics.clone(), runner);

        thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(filter).run(address).await;
            });
        });

        bridge
    }

    /// Bridge state without a listening server.
    fn detached() -> Self {
        Self {
            state: Arc::new(RwLock::new(ResultModel::default())),
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn publish(&self, model: &ResultModel) {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[bridge] windows {}, AF {:.2}%",
            guard.summary.window_count, guard.summary.af_percentage
        );
    }

    pub fn publish_status(&self, message: &str) {
        println!("[bridge] {}", message);
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ResultModel {
        self.state.read().unwrap().clone()
    }
}
