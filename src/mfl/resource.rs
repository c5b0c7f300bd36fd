use std::fmt;

/// Scoring week selector for export resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Week {
    Number(u8),
    /// Year to date
    Ytd,
    /// Season average
    Avg,
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Week::Number(n) => write!(f, "{}", n),
            Week::Ytd => f.write_str("YTD"),
            Week::Avg => f.write_str("AVG"),
        }
    }
}

/// Export resources the client knows how to request.
///
/// `week: None` lets the host pick the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    League,
    LeagueStandings,
    LiveScoring { week: Option<Week> },
    NflSchedule { week: Option<Week> },
    PlayerScores { week: Option<Week>, year: Option<u16> },
    Players { details: bool },
    PointsAllowed,
    ProjectedScores { week: Option<Week> },
    WeeklyResults { week: Option<Week> },
}

impl Resource {
    /// Value of the `TYPE` export parameter.
    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::League => "league",
            Resource::LeagueStandings => "leagueStandings",
            Resource::LiveScoring { .. } => "liveScoring",
            Resource::NflSchedule { .. } => "nflSchedule",
            Resource::PlayerScores { .. } => "playerScores",
            Resource::Players { .. } => "players",
            Resource::PointsAllowed => "pointsAllowed",
            Resource::ProjectedScores { .. } => "projectedScores",
            Resource::WeeklyResults { .. } => "weeklyResults",
        }
    }

    /// Per-call query parameters, `TYPE` first.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("TYPE".to_string(), self.type_name().to_string())];
        let mut push = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                params.push((key.to_string(), v));
            }
        };

        match *self {
            Resource::LiveScoring { week }
            | Resource::NflSchedule { week }
            | Resource::ProjectedScores { week }
            | Resource::WeeklyResults { week } => push("W", week.map(|w| w.to_string())),
            Resource::PlayerScores { week, year } => {
                push("W", week.map(|w| w.to_string()));
                push("YEAR", year.map(|y| y.to_string()));
            }
            Resource::Players { details } => {
                push("DETAILS", Some(if details { "1" } else { "0" }.to_string()))
            }
            Resource::League | Resource::LeagueStandings | Resource::PointsAllowed => {}
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(resource: Resource) -> Vec<(String, String)> {
        resource.params()
    }

    #[test]
    fn test_plain_resources_only_carry_type() {
        assert_eq!(pairs(Resource::League), vec![("TYPE".into(), "league".into())]);
        assert_eq!(
            pairs(Resource::PointsAllowed),
            vec![("TYPE".into(), "pointsAllowed".into())]
        );
    }

    #[test]
    fn test_unset_week_is_omitted() {
        let params = pairs(Resource::LiveScoring { week: None });
        assert_eq!(params, vec![("TYPE".into(), "liveScoring".into())]);
    }

    #[test]
    fn test_player_scores_week_and_year() {
        let params = pairs(Resource::PlayerScores {
            week: Some(Week::Ytd),
            year: Some(2023),
        });
        assert_eq!(
            params,
            vec![
                ("TYPE".into(), "playerScores".into()),
                ("W".into(), "YTD".into()),
                ("YEAR".into(), "2023".into()),
            ]
        );
    }

    #[test]
    fn test_players_details_flag() {
        assert_eq!(
            pairs(Resource::Players { details: true })[1],
            ("DETAILS".into(), "1".into())
        );
        assert_eq!(
            pairs(Resource::Players { details: false })[1],
            ("DETAILS".into(), "0".into())
        );
    }

    #[test]
    fn test_weekly_results_numbered_week() {
        let params = pairs(Resource::WeeklyResults {
            week: Some(Week::Number(17)),
        });
        assert_eq!(params[1], ("W".into(), "17".into()));
    }
}
