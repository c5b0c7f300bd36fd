use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::auth::{authenticate, Credentials, SessionCookie};
use super::models::{FranchiseMap, FranchiseScoring, PlayerMap, PlayerRecord};
use super::normalize::{parse_franchises, parse_live_scoring, parse_players};
use super::resource::{Resource, Week};
use super::transport::{GetRequest, Transport};
use crate::error::{MflError, Result};
use crate::table::render_table;

pub const DEFAULT_LOGIN_URL: &str = "https://api.myfantasyleague.com";
pub const DEFAULT_EXPORT_URL: &str = "https://www73.myfantasyleague.com";

/// Base URLs of the login and export hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    login_base: Url,
    export_base: Url,
}

impl Endpoints {
    pub fn new(login_base: &str, export_base: &str) -> std::result::Result<Self, url::ParseError> {
        Ok(Endpoints {
            login_base: Url::parse(login_base)?,
            export_base: Url::parse(export_base)?,
        })
    }

    fn join(base: &Url, year: u16, endpoint: &str) -> String {
        format!("{}/{}/{}", base.as_str().trim_end_matches('/'), year, endpoint)
    }

    pub fn login_url(&self, year: u16) -> String {
        Self::join(&self.login_base, year, "login")
    }

    pub fn export_url(&self, year: u16) -> String {
        Self::join(&self.export_base, year, "export")
    }
}

/// Undecoded export response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub resource: &'static str,
    pub body: String,
}

impl RawResponse {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| {
            MflError::MalformedResponse(format!("{} response is not JSON: {}", self.resource, e))
        })
    }
}

/// Authenticated client for one league season.
///
/// The franchise, player and live-scoring views are fetched on first use and
/// then served from memory for the life of the client; [`MflClient::refresh`]
/// is the only way to see newer upstream data.
pub struct MflClient {
    transport: Arc<dyn Transport>,
    session: SessionCookie,
    export_url: String,
    year: u16,
    league: String,
    franchises: Option<Arc<FranchiseMap>>,
    players: Option<Arc<PlayerMap>>,
    live_scoring: Option<Arc<Vec<FranchiseScoring>>>,
}

impl MflClient {
    /// Log in and build a client for `league` in season `year`.
    pub async fn connect(
        transport: Arc<dyn Transport>,
        endpoints: &Endpoints,
        year: u16,
        league: &str,
        credentials: &Credentials,
    ) -> Result<Self> {
        let session =
            authenticate(transport.as_ref(), &endpoints.login_url(year), credentials).await?;
        info!("Connected to league {} ({})", league, year);
        Ok(MflClient {
            transport,
            session,
            export_url: endpoints.export_url(year),
            year,
            league: league.to_string(),
            franchises: None,
            players: None,
            live_scoring: None,
        })
    }

    /// GET one export resource with the league's base parameters.
    pub async fn fetch(&self, resource: Resource) -> Result<RawResponse> {
        let mut query = vec![
            ("L".to_string(), self.league.clone()),
            ("JSON".to_string(), "1".to_string()),
        ];
        query.extend(resource.params());

        debug!("Fetching {} for league {}", resource.type_name(), self.league);
        let request =
            GetRequest::new(self.export_url.as_str(), query).with_cookie(self.session.header_value());
        let body = self.transport.get(&request).await?;

        Ok(RawResponse {
            resource: resource.type_name(),
            body,
        })
    }

    // ── Export endpoints ─────────────────────────────────────────────────────

    pub async fn league_info(&self) -> Result<RawResponse> {
        self.fetch(Resource::League).await
    }

    pub async fn league_standings(&self) -> Result<RawResponse> {
        self.fetch(Resource::LeagueStandings).await
    }

    pub async fn live_scoring(&self, week: Option<Week>) -> Result<RawResponse> {
        self.fetch(Resource::LiveScoring { week }).await
    }

    pub async fn nfl_schedule(&self, week: Option<Week>) -> Result<RawResponse> {
        self.fetch(Resource::NflSchedule { week }).await
    }

    pub async fn player_scores(&self, week: Option<Week>, year: Option<u16>) -> Result<RawResponse> {
        self.fetch(Resource::PlayerScores { week, year }).await
    }

    pub async fn players(&self, details: bool) -> Result<RawResponse> {
        self.fetch(Resource::Players { details }).await
    }

    pub async fn points_allowed(&self) -> Result<RawResponse> {
        self.fetch(Resource::PointsAllowed).await
    }

    pub async fn projected_scores(&self, week: Option<Week>) -> Result<RawResponse> {
        self.fetch(Resource::ProjectedScores { week }).await
    }

    pub async fn weekly_results(&self, week: Option<Week>) -> Result<RawResponse> {
        self.fetch(Resource::WeeklyResults { week }).await
    }

    // ── Memoized views ───────────────────────────────────────────────────────

    /// Franchises keyed by id.
    pub async fn franchise_data(&mut self) -> Result<Arc<FranchiseMap>> {
        if let Some(cached) = &self.franchises {
            return Ok(Arc::clone(cached));
        }

        let raw = self.league_info().await?.json()?;
        let franchises = Arc::new(parse_franchises(&raw)?);
        info!("Loaded {} franchises for league {}", franchises.len(), self.league);
        self.franchises = Some(Arc::clone(&franchises));
        Ok(franchises)
    }

    /// Full player records keyed by id.
    pub async fn player_data(&mut self) -> Result<Arc<PlayerMap>> {
        if let Some(cached) = &self.players {
            return Ok(Arc::clone(cached));
        }

        let raw = self.players(false).await?.json()?;
        let players = Arc::new(parse_players(&raw)?);
        info!("Loaded {} players", players.len());
        self.players = Some(Arc::clone(&players));
        Ok(players)
    }

    /// Live scoring for the current week, grouped by franchise.
    pub async fn live_scoring_data(&mut self) -> Result<Arc<Vec<FranchiseScoring>>> {
        if let Some(cached) = &self.live_scoring {
            return Ok(Arc::clone(cached));
        }

        let franchises = self.franchise_data().await?;
        let players = self.player_data().await?;
        let raw = self.live_scoring(None).await?.json()?;
        let scoring = Arc::new(parse_live_scoring(&raw, &franchises, &players)?);
        self.live_scoring = Some(Arc::clone(&scoring));
        Ok(scoring)
    }

    /// Look up one player record.
    pub async fn player(&mut self, id: &str) -> Result<Option<PlayerRecord>> {
        Ok(self.player_data().await?.get(id).cloned())
    }

    /// Drop every memoized view so the next access refetches.
    pub fn refresh(&mut self) {
        debug!("Clearing cached views for league {}", self.league);
        self.franchises = None;
        self.players = None;
        self.live_scoring = None;
    }

    // ── HTML pages ───────────────────────────────────────────────────────────

    /// Franchise table for the league page.
    pub async fn league_html(&mut self) -> Result<String> {
        let franchises = self.franchise_data().await?;
        let rows: Vec<_> = franchises.values().cloned().collect();
        Ok(render_table(
            &rows,
            &format!("League {} ({})", self.league, self.year),
            &["ID", "Franchise", "Owner", "Last Visit"],
        ))
    }

    /// One live-scoring table per franchise.
    pub async fn live_scoring_html(&mut self) -> Result<String> {
        let scoring = self.live_scoring_data().await?;
        let tables: Vec<String> = scoring
            .iter()
            .map(|franchise| {
                render_table(
                    &franchise.players,
                    &format!("{} ({})", franchise.franchise_name, franchise.manager_name),
                    &["ID", "Player", "Team", "Pos", "Score", "Secs Left"],
                )
            })
            .collect();
        Ok(tables.join("\n"))
    }
}
