//! Compilation of data-driven tree definitions into executable trees.
//!
//! Definitions come from [`arena_content::TreeDefinition`]. Compiling checks
//! every numeric leaf parameter, expands `Subtree` references inline and
//! records how many ability slots the tree reads. Search interval bounds a
//! definition leaves out are filled from the `search` range passed in,
//! normally [`AiConfig::search_interval`](arena_core::config::AiConfig::search_interval).

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use arena_content::{LeafDefinition, TreeDefinition, TreeSet};
use arena_core::config::{ArenaConfig, seconds};
use behavior_tree::builder::{always_succeed, inverter, selector, sequence};
use behavior_tree::{Behavior, Outcome};
use thiserror::Error;

use super::BehaviorTree;
use super::nodes::{
    AbilityReady, AcquireTarget, FaceTarget, HasTarget, Idle, Interact, MoveAway, MoveToward,
    RequestAbility, RequestDash, TargetInRange,
};
use crate::providers::ai::DecisionContext;

/// Reasons a tree definition cannot be compiled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("leaf `{leaf}`: `{field}` must be a finite, non-negative number (got {value})")]
    InvalidNumber {
        leaf: &'static str,
        field: &'static str,
        value: f32,
    },

    #[error("leaf `{leaf}`: minimum {min} exceeds maximum {max}")]
    InvertedRange { leaf: &'static str, min: f32, max: f32 },

    #[error("leaf `{leaf}`: ability slot {slot} is out of range")]
    SlotOutOfRange { leaf: &'static str, slot: usize },

    #[error("unknown tree `{0}`")]
    UnknownTree(String),

    #[error("tree `{0}` references itself through its subtrees")]
    RecursiveSubtree(String),
}

/// What an entity must have for a tree to work.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TreeRequirements {
    /// Ability slots read by the tree; slots `0..ability_slots` must be filled.
    pub ability_slots: usize,
}

/// An executable tree plus its requirements.
///
/// Immutable once built and shared by every entity running it.
pub struct CompiledTree {
    root: BehaviorTree,
    requirements: TreeRequirements,
}

impl CompiledTree {
    pub fn new(root: BehaviorTree, requirements: TreeRequirements) -> Self {
        Self { root, requirements }
    }

    pub fn requirements(&self) -> TreeRequirements {
        self.requirements
    }

    /// Evaluates the tree once from the root.
    pub fn evaluate(&self, ctx: &mut DecisionContext) -> Outcome {
        self.root.tick(ctx)
    }
}

impl Behavior<DecisionContext> for CompiledTree {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        self.evaluate(ctx)
    }
}

impl fmt::Debug for CompiledTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTree")
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

/// Compiles a standalone definition. `Subtree` references are rejected as
/// unknown since there is no set to resolve them against.
pub fn build(
    definition: &TreeDefinition,
    search: RangeInclusive<Duration>,
) -> Result<CompiledTree, BuildError> {
    let empty = TreeSet::new();
    Builder::new(&empty, search).compile(definition)
}

/// Compiles the tree called `name` from `set`.
pub fn build_named(
    set: &TreeSet,
    name: &str,
    search: RangeInclusive<Duration>,
) -> Result<CompiledTree, BuildError> {
    let definition = set
        .get(name)
        .ok_or_else(|| BuildError::UnknownTree(name.to_owned()))?;
    let mut builder = Builder::new(set, search);
    builder.stack.push(name.to_owned());
    builder.compile(definition)
}

/// Compiles every tree in `set`, stopping at the first error.
pub fn build_all(
    set: &TreeSet,
    search: RangeInclusive<Duration>,
) -> Result<Vec<(String, CompiledTree)>, BuildError> {
    set.keys()
        .map(|name| build_named(set, name, search.clone()).map(|tree| (name.clone(), tree)))
        .collect()
}

struct Builder<'a> {
    set: &'a TreeSet,
    /// Subtrees currently being expanded, outermost first.
    stack: Vec<String>,
    /// Fallback for search bounds a leaf leaves out.
    search: RangeInclusive<Duration>,
    requirements: TreeRequirements,
}

impl<'a> Builder<'a> {
    fn new(set: &'a TreeSet, search: RangeInclusive<Duration>) -> Self {
        Self {
            set,
            stack: Vec::new(),
            search,
            requirements: TreeRequirements::default(),
        }
    }

    fn compile(mut self, definition: &TreeDefinition) -> Result<CompiledTree, BuildError> {
        let root = self.node(definition)?;
        Ok(CompiledTree::new(root, self.requirements))
    }

    fn node(&mut self, definition: &TreeDefinition) -> Result<BehaviorTree, BuildError> {
        Ok(match definition {
            TreeDefinition::Sequence(children) => sequence(self.nodes(children)?),
            TreeDefinition::Selector(children) => selector(self.nodes(children)?),
            TreeDefinition::Inverter(child) => inverter(self.node(child)?),
            TreeDefinition::Succeed(child) => always_succeed(self.node(child)?),
            TreeDefinition::Leaf(leaf) => self.leaf(leaf)?,
            TreeDefinition::Subtree(name) => self.subtree(name)?,
        })
    }

    fn nodes(&mut self, children: &[TreeDefinition]) -> Result<Vec<BehaviorTree>, BuildError> {
        children.iter().map(|child| self.node(child)).collect()
    }

    fn subtree(&mut self, name: &str) -> Result<BehaviorTree, BuildError> {
        if self.stack.iter().any(|open| open == name) {
            return Err(BuildError::RecursiveSubtree(name.to_owned()));
        }
        let set = self.set;
        let definition = set
            .get(name)
            .ok_or_else(|| BuildError::UnknownTree(name.to_owned()))?;

        self.stack.push(name.to_owned());
        let node = self.node(definition);
        self.stack.pop();
        node
    }

    fn leaf(&mut self, leaf: &LeafDefinition) -> Result<BehaviorTree, BuildError> {
        Ok(match *leaf {
            LeafDefinition::AcquireTarget {
                min_interval,
                max_interval,
            } => {
                let min = min_interval
                    .map(|value| duration("acquire_target", "min_interval", value))
                    .transpose()?;
                let max = max_interval
                    .map(|value| duration("acquire_target", "max_interval", value))
                    .transpose()?;
                let (min, max) = match (min, max) {
                    (Some(min), Some(max)) => (min, max),
                    (Some(min), None) => (min, min.max(*self.search.end())),
                    (None, Some(max)) => (max.min(*self.search.start()), max),
                    (None, None) => (*self.search.start(), *self.search.end()),
                };
                ordered("acquire_target", min.as_secs_f32(), max.as_secs_f32())?;
                Box::new(AcquireTarget::new(min, max))
            }
            LeafDefinition::HasTarget => Box::new(HasTarget),
            LeafDefinition::TargetInRange { min, max } => {
                distance("target_in_range", "min", min)?;
                distance("target_in_range", "max", max)?;
                ordered("target_in_range", min, max)?;
                Box::new(TargetInRange { min, max })
            }
            LeafDefinition::MoveToward => Box::new(MoveToward),
            LeafDefinition::MoveAway => Box::new(MoveAway),
            LeafDefinition::FaceTarget => Box::new(FaceTarget),
            LeafDefinition::AbilityReady(slot) => {
                self.uses_slot("ability_ready", slot)?;
                Box::new(AbilityReady(slot))
            }
            LeafDefinition::RequestAbility(slot) => {
                self.uses_slot("request_ability", slot)?;
                Box::new(RequestAbility(slot))
            }
            LeafDefinition::RequestDash => Box::new(RequestDash),
            LeafDefinition::Interact => Box::new(Interact),
            LeafDefinition::Idle => Box::new(Idle),
        })
    }

    /// Slots must fit in an entity's ability set.
    fn uses_slot(&mut self, leaf: &'static str, slot: usize) -> Result<(), BuildError> {
        let count = slot
            .checked_add(1)
            .filter(|count| *count <= ArenaConfig::MAX_ABILITIES)
            .ok_or(BuildError::SlotOutOfRange { leaf, slot })?;
        self.requirements.ability_slots = self.requirements.ability_slots.max(count);
        Ok(())
    }
}

fn duration(leaf: &'static str, field: &'static str, value: f32) -> Result<Duration, BuildError> {
    seconds(field, value).map_err(|_| BuildError::InvalidNumber { leaf, field, value })
}

fn distance(leaf: &'static str, field: &'static str, value: f32) -> Result<(), BuildError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidNumber { leaf, field, value })
    }
}

fn ordered(leaf: &'static str, min: f32, max: f32) -> Result<(), BuildError> {
    if min <= max {
        Ok(())
    } else {
        Err(BuildError::InvertedRange { leaf, min, max })
    }
}
