use std::collections::BTreeMap;

/// Named tree definitions, as stored in `trees.ron`.
pub type TreeSet = BTreeMap<String, TreeDefinition>;

/// Serialized decision tree.
///
/// ```ron
/// Selector([
///     Sequence([Leaf(HasTarget), Leaf(TargetInRange(min: 0.0, max: 1.5)), Leaf(RequestAbility(0))]),
///     Leaf(Idle),
/// ])
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeDefinition {
    Sequence(Vec<TreeDefinition>),
    Selector(Vec<TreeDefinition>),
    Inverter(Box<TreeDefinition>),
    /// Runs the child and reports success regardless.
    Succeed(Box<TreeDefinition>),
    Leaf(LeafDefinition),
    /// Reference to another named tree in the same set.
    Subtree(String),
}

/// Built-in leaf kinds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeafDefinition {
    /// Throttled nearest-target search, re-run every `min_interval` to
    /// `max_interval` seconds. An omitted bound takes the arena's configured
    /// search interval.
    AcquireTarget {
        #[cfg_attr(feature = "serde", serde(default))]
        min_interval: Option<f32>,
        #[cfg_attr(feature = "serde", serde(default))]
        max_interval: Option<f32>,
    },
    HasTarget,
    /// Distance to target within `[min, max]`.
    TargetInRange { min: f32, max: f32 },
    MoveToward,
    MoveAway,
    FaceTarget,
    /// Ability in slot `n` is off cooldown.
    AbilityReady(usize),
    /// Requests the ability in slot `n`.
    RequestAbility(usize),
    RequestDash,
    Interact,
    Idle,
}

impl TreeDefinition {
    pub fn leaf(leaf: LeafDefinition) -> Self {
        Self::Leaf(leaf)
    }

    /// Number of nodes, subtree references counting as one.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Sequence(children) | Self::Selector(children) => {
                1 + children.iter().map(Self::node_count).sum::<usize>()
            }
            Self::Inverter(child) | Self::Succeed(child) => 1 + child.node_count(),
            Self::Leaf(_) | Self::Subtree(_) => 1,
        }
    }
}
