//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{AlwaysSucceed, Behavior, Inverter, Leaf, Outcome, Selector, Sequence};

/// Creates a sequence node.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Creates an inverter node.
#[inline]
pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}

/// Creates a closure-backed leaf node.
#[inline]
pub fn leaf<C, F>(name: &'static str, run: F) -> Box<dyn Behavior<C>>
where
    C: 'static,
    F: Fn(&mut C) -> Outcome + Send + Sync + 'static,
{
    Box::new(Leaf::new(name, run))
}
