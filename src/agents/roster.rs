//! Building a seat-ordered set of agents from agent kinds.

use super::{Agent, HumanAgent, HumanInput, RandomAgent};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// The kinds of agent a seat can be given.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentKind {
    /// A person at the board.
    Human,
    /// Uniformly random legal moves.
    Random,
    /// Look-ahead search. Not available yet.
    Search,
    /// Learned policy. Not available yet.
    Learned,
}

impl AgentKind {
    /// Checks if agents of this kind can be built.
    pub fn is_supported(self) -> bool {
        matches!(self, AgentKind::Human | AgentKind::Random)
    }
}

/// Agents in seat order, plus the input handle for every human seat.
pub struct Roster {
    agents: Vec<Box<dyn Agent>>,
    inputs: Vec<Option<HumanInput>>,
}

impl Roster {
    /// Builds one agent per seat.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if there are no seats or the
    /// names do not match the seats, and [`EngineError::Unsupported`] for
    /// kinds that are not implemented.
    #[instrument(skip(names), fields(seats = kinds.len()))]
    pub fn build(kinds: &[AgentKind], names: &[String]) -> Result<Self, EngineError> {
        if kinds.is_empty() {
            return Err(EngineError::InvalidArgument("no agents given".to_string()));
        }
        if kinds.len() != names.len() {
            return Err(EngineError::InvalidArgument(format!(
                "{} agents but {} names",
                kinds.len(),
                names.len()
            )));
        }

        let mut agents: Vec<Box<dyn Agent>> = Vec::with_capacity(kinds.len());
        let mut inputs = Vec::with_capacity(kinds.len());
        for (kind, name) in kinds.iter().zip(names) {
            match kind {
                AgentKind::Human => {
                    let (agent, input) = HumanAgent::new(name.clone());
                    agents.push(Box::new(agent));
                    inputs.push(Some(input));
                }
                AgentKind::Random => {
                    agents.push(Box::new(RandomAgent::new(name.clone())));
                    inputs.push(None);
                }
                AgentKind::Search | AgentKind::Learned => {
                    return Err(EngineError::Unsupported(format!("{kind} agent")));
                }
            }
            info!(agent = %name, kind = %kind, "Seat filled");
        }

        Ok(Self { agents, inputs })
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Checks if the roster has no seats. Never true for a built roster.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Splits into the agents and the per-seat human input handles.
    pub fn into_parts(self) -> (Vec<Box<dyn Agent>>, Vec<Option<HumanInput>>) {
        (self.agents, self.inputs)
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.agents.iter().map(|agent| agent.name()).collect();
        f.debug_struct("Roster").field("agents", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn names(count: usize) -> Vec<String> {
        strictly_mnk::default_player_names(count)
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(AgentKind::from_str("human"), Ok(AgentKind::Human));
        assert_eq!(AgentKind::from_str("random"), Ok(AgentKind::Random));
        assert!(AgentKind::from_str("oracle").is_err());
        assert_eq!(AgentKind::Learned.to_string(), "learned");
    }

    #[test]
    fn test_build_mixed_roster() {
        let roster = Roster::build(&[AgentKind::Human, AgentKind::Random], &names(2)).unwrap();
        assert_eq!(roster.len(), 2);
        let (agents, inputs) = roster.into_parts();
        assert!(agents[0].is_human());
        assert!(!agents[1].is_human());
        assert_eq!(agents[1].name(), "Player 2");
        assert!(inputs[0].is_some());
        assert!(inputs[1].is_none());
    }

    #[test]
    fn test_supported_kinds() {
        use strum::IntoEnumIterator;
        let supported: Vec<_> = AgentKind::iter().filter(|kind| kind.is_supported()).collect();
        assert_eq!(supported, vec![AgentKind::Human, AgentKind::Random]);
    }

    #[test]
    fn test_unsupported_kinds() {
        for kind in [AgentKind::Search, AgentKind::Learned] {
            assert!(!kind.is_supported());
            let result = Roster::build(&[AgentKind::Random, kind], &names(2));
            assert!(matches!(result, Err(EngineError::Unsupported(_))));
        }
    }

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(matches!(Roster::build(&[], &[]), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(
            Roster::build(&[AgentKind::Random], &names(2)),
            Err(EngineError::InvalidArgument(_))
        ));
    }
}
