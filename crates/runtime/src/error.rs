//! Unified error types surfaced by the runtime API.
//!
//! Configuration problems (unknown effects, trees that need more abilities
//! than an entity knows) are raised while building the runtime or spawning,
//! never from inside [`Runtime::tick`](crate::Runtime::tick).
use arena_core::{AbilityError, AbilityId, ConfigError, EntityId};
use behavior_tree::BehaviorError;
use thiserror::Error;

use crate::providers::ai::BuildError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("entity {0} is not player-controlled")]
    NotPlayerControlled(EntityId),

    #[error("decision failed for entity {entity}")]
    Decision {
        entity: EntityId,
        #[source]
        source: BehaviorError,
    },

    #[error("no decision tree named '{0}'")]
    UnknownTree(String),

    #[error("entity {entity} knows {known} abilities but tree '{tree}' uses {required} slots")]
    MissingAbilities {
        entity: EntityId,
        tree: String,
        known: usize,
        required: usize,
    },

    #[error("{0} is defined more than once")]
    DuplicateAbility(AbilityId),

    #[error("{0} is not in the ability catalog")]
    UnknownAbility(AbilityId),

    #[error("ability '{ability}' uses unregistered effect '{effect}'")]
    UnknownEffect { ability: String, effect: String },

    #[error(transparent)]
    Ability(#[from] AbilityError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("invalid configuration")]
    Config(#[from] ConfigError),
}
