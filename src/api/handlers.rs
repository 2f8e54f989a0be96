use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Number, Value};
use tracing::info;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    /// Carried as a raw JSON number; integers stay integers all the way
    /// into the response echo.
    pub temperature: Option<Number>,
}

/// `POST /start`
pub async fn start_publishing(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .publisher
        .start(state.broker.clone(), state.topic.clone())
        .await?;
    Ok(Json(
        json!({ "message": "Started publishing temperature data" }),
    ))
}

/// `POST /stop`
pub async fn stop_publishing(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.publisher.stop().await?;
    Ok(Json(
        json!({ "message": "Stopped publishing temperature data" }),
    ))
}

/// `POST /publish`
///
/// Validates that the `temperature` field is present before the broker is
/// touched, then forwards the value verbatim.
pub async fn publish_custom(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<Value>, ApiError> {
    let temperature = request.temperature.ok_or(ApiError::MissingTemperature)?;

    state
        .broker
        .publish(&state.topic, temperature.to_string())
        .await?;
    info!(
        "Published custom temperature: {temperature} to topic: {}",
        state.topic
    );

    Ok(Json(json!({
        "message": format!("Published custom temperature: {temperature}")
    })))
}

/// `GET /status`
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "publishing": state.publisher.is_running().await }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::BrokerConnection;
    use crate::config::BrokerSettings;
    use crate::publisher::PublisherHandle;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(BrokerConnection::new(
                &BrokerSettings::default(),
                "tempbridge-test",
            )),
            Arc::new(PublisherHandle::new(Duration::from_millis(10))),
            "temperature".to_string(),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn start_then_start_again_conflicts() {
        let state = test_state();

        let ok = start_publishing(State(state.clone())).await.expect("first start");
        assert_eq!(ok.0["message"], "Started publishing temperature data");

        let err = start_publishing(State(state.clone()))
            .await
            .expect_err("second start");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Already publishing");

        assert!(state.publisher.is_running().await);
        state.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn stop_when_idle_conflicts() {
        let err = stop_publishing(State(test_state()))
            .await
            .expect_err("stop while stopped");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Not currently publishing"
        );
    }

    #[tokio::test]
    async fn stop_after_start_succeeds() {
        let state = test_state();
        start_publishing(State(state.clone())).await.expect("start");

        let ok = stop_publishing(State(state.clone())).await.expect("stop");
        assert_eq!(ok.0["message"], "Stopped publishing temperature data");
        assert!(!state.publisher.is_running().await);
    }

    #[tokio::test]
    async fn publish_custom_echoes_the_exact_value() {
        let request = PublishRequest {
            temperature: Some(Number::from_f64(21.5).unwrap()),
        };
        let ok = publish_custom(State(test_state()), Json(request))
            .await
            .expect("publish");
        assert_eq!(ok.0["message"], "Published custom temperature: 21.5");
    }

    #[tokio::test]
    async fn publish_custom_preserves_integer_values() {
        let request: PublishRequest = serde_json::from_str(r#"{"temperature": 21}"#).unwrap();
        let ok = publish_custom(State(test_state()), Json(request))
            .await
            .expect("publish");
        assert_eq!(ok.0["message"], "Published custom temperature: 21");
    }

    #[tokio::test]
    async fn publish_custom_requires_the_field() {
        let request: PublishRequest = serde_json::from_str("{}").unwrap();
        let err = publish_custom(State(test_state()), Json(request))
            .await
            .expect_err("missing field");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Temperature value not provided"
        );
    }

    #[tokio::test]
    async fn status_reflects_the_lifecycle() {
        let state = test_state();
        assert_eq!(status(State(state.clone())).await.0["publishing"], false);

        start_publishing(State(state.clone())).await.expect("start");
        assert_eq!(status(State(state.clone())).await.0["publishing"], true);

        state.publisher.stop().await.unwrap();
    }
}
