use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    engine::{Forecaster, HourlyOutlook, OutlookRequest, PredictionBatch, PredictionRequest},
    species::{ScoringError, Species, SpeciesProfile},
    weather::WeatherProvider,
};

#[derive(Serialize)]
pub struct SpeciesEntry {
    pub species: Species,
    pub profile: &'static SpeciesProfile,
}

/// Scoring errors are caller mistakes, so they map to 400.
pub struct ApiError(ScoringError);

impl From<ScoringError> for ApiError {
    fn from(value: ScoringError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "rejected request");
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub fn router<P>(forecaster: Arc<Forecaster<P>>) -> Router
where
    P: WeatherProvider + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/species", get(species))
        .route("/api/predictions", post(predictions::<P>))
        .route("/api/outlook", post(outlook::<P>))
        .with_state(forecaster)
}

pub async fn run<P>(forecaster: Arc<Forecaster<P>>, addr: SocketAddr) -> Result<()>
where
    P: WeatherProvider + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "prediction service listening");
    axum::serve(listener, router(forecaster))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    log_shutdown(tokio::signal::ctrl_c().await);
}

/// Returns whether shutdown was requested rather than forced by a failed
/// signal handler.
fn log_shutdown(signal: std::io::Result<()>) -> bool {
    match signal {
        Ok(()) => {
            info!("shutting down prediction service");
            true
        }
        Err(err) => {
            warn!(error = %err, "failed to listen for ctrl-c, shutting down");
            false
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn species() -> Json<Vec<SpeciesEntry>> {
    Json(
        Species::ALL
            .into_iter()
            .map(|species| SpeciesEntry {
                species,
                profile: species.profile(),
            })
            .collect(),
    )
}

async fn predictions<P: WeatherProvider + 'static>(
    State(forecaster): State<Arc<Forecaster<P>>>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionBatch>, ApiError> {
    let batch = forecaster.generate_predictions(&request).await?;
    Ok(Json(batch))
}

async fn outlook<P: WeatherProvider + 'static>(
    State(forecaster): State<Arc<Forecaster<P>>>,
    Json(request): Json<OutlookRequest>,
) -> Result<Json<Vec<HourlyOutlook>>, ApiError> {
    let outlooks = forecaster.outlook(&request).await?;
    Ok(Json(outlooks))
}
