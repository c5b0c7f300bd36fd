use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::MflError;
use crate::mfl::{Credentials, Endpoints, MflClient, Transport};

#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub endpoints: Endpoints,
    pub credentials: Credentials,
}

/// Build the Axum router for the trigger endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(trigger_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Which page a trigger request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    LiveScoring,
    League,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRequest {
    pub year: u16,
    pub league: String,
    pub view: View,
}

impl TriggerRequest {
    /// Read `year`, `league` and the view flags from query parameters.
    ///
    /// `league` doubles as the league-page flag, so the league page is the
    /// default and `live_scoring` switches to the live view.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let year = params
            .get("year")
            .ok_or("missing `year` parameter")?
            .trim()
            .parse::<u16>()
            .map_err(|_| "`year` must be a season number such as 2024".to_string())?;
        let league = params
            .get("league")
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .ok_or("missing `league` parameter")?
            .to_string();

        let view = if params.contains_key("live_scoring") {
            View::LiveScoring
        } else {
            View::League
        };

        Ok(TriggerRequest { year, league, view })
    }
}

/// HTTP status for a client failure; the body carries only the error message.
pub fn status_for(err: &MflError) -> StatusCode {
    match err {
        MflError::Transport { timeout: true, .. } => StatusCode::GATEWAY_TIMEOUT,
        MflError::Authentication(_) | MflError::Transport { .. } | MflError::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        MflError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: MflError) -> (StatusCode, String) {
    error!("Trigger request failed: {}", err);
    (status_for(&err), err.to_string())
}

/// GET /?year=2024&league=12345[&live_scoring]
async fn trigger_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, (StatusCode, String)> {
    let request =
        TriggerRequest::from_params(&params).map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    info!(
        "Rendering {:?} for league {} ({})",
        request.view, request.league, request.year
    );
    let mut client = MflClient::connect(
        Arc::clone(&state.transport),
        &state.endpoints,
        request.year,
        &request.league,
        &state.credentials,
    )
    .await
    .map_err(error_response)?;

    let html = match request.view {
        View::LiveScoring => client.live_scoring_html().await,
        View::League => client.league_html().await,
    }
    .map_err(error_response)?;

    Ok(Html(html).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mfl::transport::fake::FakeTransport;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn seed(fake: &FakeTransport) {
        fake.respond(
            "league",
            json!({"league": {"franchises": {"franchise": [
                {"id": "0001", "name": "Blitz", "owner_name": "Sam", "lastVisit": "0"}
            ]}}}),
        );
        fake.respond(
            "players",
            json!({"players": {"player": [
                {"id": "100", "name": "Allen, Josh", "team": "BUF", "position": "QB"}
            ]}}),
        );
        fake.respond(
            "liveScoring",
            json!({"liveScoring": {"franchise": [
                {"id": "0001", "players": {"player": [
                    {"id": "100", "score": "25.10", "gameSecondsRemaining": "0"}
                ]}}
            ]}}),
        );
    }

    async fn spawn(fake: FakeTransport) -> String {
        let state = AppState {
            transport: Arc::new(fake),
            endpoints: Endpoints::new("http://login.test", "http://export.test").unwrap(),
            credentials: Credentials::new("commish", "hunter2"),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_from_params_views() {
        let req = TriggerRequest::from_params(&params(&[("year", "2024"), ("league", "12345")]))
            .unwrap();
        assert_eq!(req.year, 2024);
        assert_eq!(req.league, "12345");
        assert_eq!(req.view, View::League);

        let req = TriggerRequest::from_params(&params(&[
            ("year", "2024"),
            ("league", "12345"),
            ("live_scoring", ""),
        ]))
        .unwrap();
        assert_eq!(req.view, View::LiveScoring);
    }

    #[test]
    fn test_from_params_rejects_bad_input() {
        assert!(TriggerRequest::from_params(&params(&[("league", "12345")])).is_err());
        assert!(TriggerRequest::from_params(&params(&[("year", "2024")])).is_err());
        assert!(TriggerRequest::from_params(&params(&[("year", "twenty"), ("league", "1")])).is_err());
        assert!(TriggerRequest::from_params(&params(&[("year", "2024"), ("league", " ")])).is_err());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&MflError::Authentication("Invalid Password".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&MflError::Transport { message: "timed out".into(), timeout: true }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(&MflError::MalformedResponse("missing `id`".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&MflError::Lookup("player 1".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_league_page() {
        let fake = FakeTransport::new();
        seed(&fake);
        let base = spawn(fake).await;

        let resp = reqwest::get(format!("{}/?year=2024&league=12345", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = resp.text().await.unwrap();
        assert!(body.contains("<tr><td>0001</td><td>Blitz</td><td>Sam</td><td>1969-12-31 18:00:00</td></tr>"));
    }

    #[tokio::test]
    async fn test_live_scoring_page() {
        let fake = FakeTransport::new();
        seed(&fake);
        let base = spawn(fake.clone()).await;

        let resp = reqwest::get(format!("{}/?year=2024&league=12345&live_scoring=1", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = resp.text().await.unwrap();
        assert!(body.contains("<span>Blitz (Sam)</span>"));
        assert!(body.contains("<td>Allen, Josh</td>"));
        assert_eq!(fake.count("liveScoring"), 1);
    }

    #[tokio::test]
    async fn test_missing_params_is_bad_request() {
        let base = spawn(FakeTransport::new()).await;
        let resp = reqwest::get(format!("{}/?league=12345", base)).await.unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn test_rejected_login_is_bad_gateway() {
        let fake = FakeTransport::new();
        fake.set_login("<error>Invalid Password</error>");
        let base = spawn(fake).await;

        let resp = reqwest::get(format!("{}/?year=2024&league=12345", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 502);
        let body = resp.text().await.unwrap();
        assert!(body.contains("Invalid Password"));
        assert!(!body.contains("hunter2"));
    }
}
