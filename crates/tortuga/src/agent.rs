use std::collections::{btree_map::Entry, BTreeMap};

use kurbo::{Point, Vec2};

use crate::script::AngleUnit;

/// The mutable state of one turtle.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    pub position: Point,
    /// Radians, anticlockwise from the +x axis, always in `[0, 2π)`.
    pub heading: f64,
    /// How rotation amounts are read. Switching it does not touch `heading`.
    pub angle_unit: AngleUnit,
    pub pen_down: bool,
}

impl Default for AgentState {
    fn default() -> Self {
        AgentState {
            position: Point::ORIGIN,
            heading: 0.0,
            angle_unit: AngleUnit::Degrees,
            pen_down: true,
        }
    }
}

impl AgentState {
    /// The heading, expressed in this agent's current angle unit.
    pub fn heading_in_unit(&self) -> f64 {
        self.angle_unit.from_radians(self.heading)
    }

    /// A unit vector pointing where the agent faces.
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }
}

/// All the agents of one interpreter run, keyed by name.
#[derive(Debug, Default)]
pub struct AgentStore {
    agents: BTreeMap<String, AgentState>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AgentState> {
        self.agents.get(name)
    }

    /// Look up an agent, creating it with the default state if it doesn't exist yet.
    pub fn get_or_create(&mut self, name: &str) -> &mut AgentState {
        match self.agents.entry(name.to_owned()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                log::debug!("creating agent {name}");
                e.insert(AgentState::default())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All agents, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentState)> {
        self.agents.iter().map(|(name, state)| (name.as_str(), state))
    }
}
