//! Levels and per-type population tracking
//!
//! A level describes the standing population the aquarium should hold and
//! how much eaten value completes it.

use serde::{Deserialize, Serialize};

use super::creature::CreatureKind;

/// Target vs. live count for one creature kind within a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationNode {
    pub kind: CreatureKind,
    /// Steady-state target
    pub population: u32,
    /// Alive or already requested
    pub current_population: u32,
}

impl PopulationNode {
    pub fn new(kind: CreatureKind, population: u32) -> Self {
        Self {
            kind,
            population,
            current_population: 0,
        }
    }

    /// Creatures still owed to reach the target
    pub fn deficit(&self) -> u32 {
        self.population.saturating_sub(self.current_population)
    }
}

/// One level: population targets plus score threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AquariumLevel {
    pub nodes: Vec<PopulationNode>,
    pub level_score: u32,
    pub target_score: u32,
}

impl AquariumLevel {
    pub fn new(target_score: u32, nodes: Vec<PopulationNode>) -> Self {
        Self {
            nodes,
            level_score: 0,
            target_score,
        }
    }

    /// Build from `(kind, population)` pairs
    pub fn with_population(target_score: u32, population: &[(CreatureKind, u32)]) -> Self {
        let nodes = population
            .iter()
            .map(|&(kind, count)| PopulationNode::new(kind, count))
            .collect();
        Self::new(target_score, nodes)
    }

    pub fn is_completed(&self) -> bool {
        self.level_score >= self.target_score
    }

    /// Zero every node's live count
    pub fn population_reset(&mut self) {
        for node in &mut self.nodes {
            node.current_population = 0;
        }
    }

    /// Population and score reset, ready to be replayed when levels wrap
    pub fn level_reset(&mut self) {
        self.population_reset();
        self.level_score = 0;
    }

    /// Record that a creature of `kind` worth `value` was eaten.
    ///
    /// Only the first node of that kind is touched; a node already at zero
    /// is left alone and no score is awarded.
    pub fn consume_population(&mut self, kind: CreatureKind, value: u32) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.kind == kind) else {
            log::trace!("No population node for {} in this level", kind);
            return;
        };
        if node.current_population == 0 {
            log::trace!("{} population already empty, nothing consumed", kind);
            return;
        }
        node.current_population -= 1;
        self.level_score += value;
        log::trace!(
            "Consumed {} (pop now {}), level score {}/{}",
            kind,
            node.current_population,
            self.level_score,
            self.target_score
        );
    }

    /// One entry per creature owed, crediting each node up to its target.
    ///
    /// Counts are credited when requested, not when the spawn lands.
    pub fn build_repopulate_list(&mut self) -> Vec<CreatureKind> {
        let mut to_spawn = Vec::new();
        for node in &mut self.nodes {
            let delta = node.deficit();
            if delta > 0 {
                to_spawn.extend(std::iter::repeat_n(node.kind, delta as usize));
                node.current_population += delta;
            }
        }
        to_spawn
    }

    pub fn repopulate(&mut self) -> Vec<CreatureKind> {
        self.build_repopulate_list()
    }

    /// Node for a kind, if the level tracks it
    pub fn node(&self, kind: CreatureKind) -> Option<&PopulationNode> {
        self.nodes.iter().find(|n| n.kind == kind)
    }
}
