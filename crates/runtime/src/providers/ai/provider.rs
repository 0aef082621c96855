//! Behavior tree intent provider.

use std::sync::Arc;
use std::time::Duration;

use arena_core::{AbilitySlot, EntityId, InputIntent, SpatialQuery, TargetProvider};
use behavior_tree::BehaviorError;
use tracing::trace;

use super::{CompiledTree, DecisionContext};
use crate::providers::IntentProvider;

/// AI provider that evaluates a shared [`CompiledTree`] once per tick.
///
/// The tree is immutable and may drive any number of entities; everything
/// entity-specific (target, throttles, RNG) lives in the owned
/// [`DecisionContext`].
///
/// # Example
///
/// ```rust,ignore
/// let tree = Arc::new(presets::brute(config.ai.search_interval()?));
/// let provider = BehaviorTreeProvider::new(tree, entity, view.clone(), view);
/// ```
#[derive(Debug)]
pub struct BehaviorTreeProvider {
    tree: Arc<CompiledTree>,
    context: DecisionContext,
}

impl BehaviorTreeProvider {
    pub fn new(
        tree: Arc<CompiledTree>,
        entity: EntityId,
        spatial: Arc<dyn SpatialQuery>,
        targets: Arc<dyn TargetProvider>,
    ) -> Self {
        Self {
            tree,
            context: DecisionContext::new(entity, spatial, targets),
        }
    }

    pub fn tree(&self) -> &Arc<CompiledTree> {
        &self.tree
    }

    pub fn context(&self) -> &DecisionContext {
        &self.context
    }

    pub fn reset(&mut self) {
        self.context.forget();
    }
}

impl IntentProvider for BehaviorTreeProvider {
    fn next_intent(
        &mut self,
        slots: &[AbilitySlot],
        dt: Duration,
    ) -> Result<InputIntent, BehaviorError> {
        self.context.begin_tick(slots, dt);
        let status = self.tree.evaluate(&mut self.context)?;

        trace!(
            target: "arena::ai",
            entity = %self.context.entity,
            ?status,
            target_entity = ?self.context.target,
            intent = ?self.context.intent,
            "tree evaluated"
        );

        Ok(self.context.intent.clone())
    }
}
