//! Skills: static definitions that turn into frames.

use tracing::debug;

use crate::events::EventKind;
use crate::stack::{Frame, FrameId, ResolutionStack};

use super::attribute::AttributeKind;
use super::combatant::{Arena, CombatantId};
use super::effect::CombatEffect;
use super::error::SkillError;
use super::resource::ResourceKind;

/// A usable combat skill.
pub trait Skill {
    /// Display name, also used for frame labels.
    fn name(&self) -> &str;

    /// Category of the frame the skill pushes.
    fn kind(&self) -> EventKind;

    /// Resources paid on activation.
    fn costs(&self) -> &[(ResourceKind, i64)];

    /// Pay the costs and push the skill's frame.
    ///
    /// Nothing resolves here; the caller drives the stack afterwards.
    fn activate(
        &self,
        arena: &mut Arena,
        user: CombatantId,
        target: CombatantId,
        stack: &mut ResolutionStack<Arena>,
    ) -> Result<FrameId, SkillError>;

    /// A DealDamage frame attributed to this skill.
    fn damage_frame(&self, target: CombatantId, amount: i64) -> Frame<Arena> {
        CombatEffect::damage(target, amount)
            .into_frame(EventKind::DealDamage, format!("Deal Damage from {}", self.name()))
    }
}

/// A plain weapon attack.
///
/// Pushes an Attack frame whose effect pushes a DealDamage frame for the
/// user's weapon damage. Listeners can therefore cancel the attack as a
/// whole (Before Attack) or only its damage (Before DealDamage).
#[derive(Clone, Debug)]
pub struct BasicAttack {
    name: String,
    costs: Vec<(ResourceKind, i64)>,
}

impl Default for BasicAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicAttack {
    /// Create the attack with its standard cost of 1 GS.
    pub fn new() -> Self {
        Self {
            name: "Basic Attack".to_string(),
            costs: vec![(ResourceKind::Gs, 1)],
        }
    }

    /// Replace the cost (builder pattern).
    #[must_use]
    pub fn with_costs(mut self, costs: Vec<(ResourceKind, i64)>) -> Self {
        self.costs = costs;
        self
    }
}

impl Skill for BasicAttack {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EventKind {
        EventKind::Attack
    }

    fn costs(&self) -> &[(ResourceKind, i64)] {
        &self.costs
    }

    fn activate(
        &self,
        arena: &mut Arena,
        user: CombatantId,
        target: CombatantId,
        stack: &mut ResolutionStack<Arena>,
    ) -> Result<FrameId, SkillError> {
        if arena.get(target).is_none() {
            return Err(SkillError::UnknownCombatant(target));
        }
        let attacker = arena.get_mut(user).ok_or(SkillError::UnknownCombatant(user))?;
        attacker.pay(&self.costs)?;

        let damage = attacker.stat(AttributeKind::WeaponDamage);
        let damage_frame = self.damage_frame(target, damage);
        let attack = Frame::new(self.kind(), self.name.clone(), damage, move |ctx| {
            ctx.push(damage_frame);
        });

        debug!(skill = %self.name, %user, %target, damage, "skill activated");
        Ok(stack.push(attack))
    }
}
