//! Combatants and the arena that holds them.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, AttributeKind};
use super::error::ResourceError;
use super::resource::{PoolConfig, Resource, ResourceKind};

/// Identifier of a combatant within an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Create a new combatant ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Combatant({})", self.0)
    }
}

/// Stat block used to build a [`Combatant`].
///
/// Loadable from JSON or any other serde format:
///
/// ```
/// use combat_stack::combat::{AttributeKind, CombatantConfig, ResourceKind};
///
/// let config: CombatantConfig = serde_json::from_str(r#"{
///     "name": "Goblin",
///     "attributes": { "Strength": 6, "WeaponDamage": 2 },
///     "resources": { "Hp": { "max": 12, "start": 12 } }
/// }"#).unwrap();
///
/// assert_eq!(config.attributes[&AttributeKind::Strength], 6);
/// assert_eq!(config.resources[&ResourceKind::Hp].max, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantConfig {
    /// Display name.
    pub name: String,

    /// Base attribute values. Missing attributes start at 0.
    #[serde(default)]
    pub attributes: BTreeMap<AttributeKind, i64>,

    /// Resource pools. Missing pools do not exist on the combatant.
    #[serde(default)]
    pub resources: BTreeMap<ResourceKind, PoolConfig>,
}

impl CombatantConfig {
    /// An empty stat block.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    /// The standard orc stat block.
    pub fn orc() -> Self {
        Self::new("Orc")
            .with_attribute(AttributeKind::Strength, 12)
            .with_attribute(AttributeKind::Agility, 6)
            .with_attribute(AttributeKind::Vitality, 10)
            .with_attribute(AttributeKind::Alertness, 4)
            .with_attribute(AttributeKind::Intelligence, 4)
            .with_attribute(AttributeKind::Willpower, 4)
            .with_attribute(AttributeKind::WeaponDamage, 0)
            .with_resource(ResourceKind::Hp, PoolConfig::full(32))
            .with_resource(ResourceKind::Gs, PoolConfig::full(12))
            .with_resource(ResourceKind::Armor, PoolConfig::new(10, 0))
            .with_resource(ResourceKind::Shield, PoolConfig::unbounded(0))
    }

    /// Set a base attribute (builder pattern).
    #[must_use]
    pub fn with_attribute(mut self, kind: AttributeKind, base: i64) -> Self {
        self.attributes.insert(kind, base);
        self
    }

    /// Add a resource pool (builder pattern).
    #[must_use]
    pub fn with_resource(mut self, kind: ResourceKind, pool: PoolConfig) -> Self {
        self.resources.insert(kind, pool);
        self
    }
}

/// A character taking part in combat.
#[derive(Debug)]
pub struct Combatant {
    name: String,
    attributes: FxHashMap<AttributeKind, Attribute>,
    resources: FxHashMap<ResourceKind, Resource>,
}

impl Combatant {
    /// Build a combatant from a stat block.
    pub fn from_config(config: &CombatantConfig) -> Self {
        Self {
            name: config.name.clone(),
            attributes: config
                .attributes
                .iter()
                .map(|(&kind, &base)| (kind, Attribute::new(base)))
                .collect(),
            resources: config
                .resources
                .iter()
                .map(|(&kind, &pool)| (kind, Resource::new(kind, pool)))
                .collect(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current (buffed) value of an attribute; 0 if unset.
    #[must_use]
    pub fn stat(&self, kind: AttributeKind) -> i64 {
        self.attributes.get(&kind).map_or(0, Attribute::current)
    }

    /// An attribute, if set.
    #[must_use]
    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(&kind)
    }

    /// Mutable attribute, created at base 0 if unset.
    pub fn attribute_mut(&mut self, kind: AttributeKind) -> &mut Attribute {
        self.attributes.entry(kind).or_default()
    }

    /// A resource pool, if the combatant has one.
    #[must_use]
    pub fn resource(&self, kind: ResourceKind) -> Option<&Resource> {
        self.resources.get(&kind)
    }

    /// Mutable resource pool, if the combatant has one.
    pub fn resource_mut(&mut self, kind: ResourceKind) -> Option<&mut Resource> {
        self.resources.get_mut(&kind)
    }

    /// Current value of a pool, or 0 if the combatant has none.
    #[must_use]
    pub fn current(&self, kind: ResourceKind) -> i64 {
        self.resources.get(&kind).map_or(0, Resource::current)
    }

    /// Pay every cost, or nothing.
    ///
    /// All costs are checked before any pool is touched.
    pub fn pay(&mut self, costs: &[(ResourceKind, i64)]) -> Result<(), ResourceError> {
        for &(kind, _) in costs {
            let pool = self.resource(kind).ok_or(ResourceError::MissingPool(kind))?;
            // The same pool may appear more than once.
            let owed: i64 = costs.iter().filter(|(k, _)| *k == kind).map(|(_, a)| a).sum();
            if !pool.can_afford(owed) {
                return Err(ResourceError::Insufficient {
                    resource: kind,
                    current: pool.current(),
                    requested: owed,
                });
            }
        }

        for &(kind, amount) in costs {
            if let Some(pool) = self.resource_mut(kind) {
                pool.try_reduce(amount)?;
            }
        }
        Ok(())
    }
}

/// All combatants in one fight, addressed by [`CombatantId`].
#[derive(Debug, Default)]
pub struct Arena {
    combatants: Vec<Combatant>,
}

impl Arena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant, returns its ID.
    pub fn add(&mut self, combatant: Combatant) -> CombatantId {
        let id = CombatantId::new(self.combatants.len() as u32);
        self.combatants.push(combatant);
        id
    }

    /// Add a combatant built from a stat block.
    pub fn spawn(&mut self, config: &CombatantConfig) -> CombatantId {
        self.add(Combatant::from_config(config))
    }

    /// Get a combatant.
    #[must_use]
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    /// Get a mutable combatant.
    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    /// Number of combatants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    /// Is the arena empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Iterate combatants with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, &Combatant)> {
        self.combatants
            .iter()
            .enumerate()
            .map(|(i, c)| (CombatantId::new(i as u32), c))
    }
}
