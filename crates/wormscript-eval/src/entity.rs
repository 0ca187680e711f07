//! World objects a script can refer to.
//!
//! The interpreter never owns world state. It holds shared handles to objects
//! owned by the game and reads their live properties on every evaluation.

use std::fmt;
use std::rc::Rc;

use wormscript_ast::Property;

use crate::error::TypeError;

/// Read-only view of a worm in the world.
pub trait WormObject: fmt::Debug {
    fn name(&self) -> String;
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn radius(&self) -> f64;
    /// Facing angle in radians.
    fn direction(&self) -> f64;
    fn hit_points(&self) -> i64;
    fn max_hit_points(&self) -> i64;
    fn action_points(&self) -> i64;
    fn max_action_points(&self) -> i64;
    /// Team name, if the worm belongs to one.
    fn team(&self) -> Option<String>;
}

/// Read-only view of a food ration in the world.
pub trait FoodObject: fmt::Debug {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn radius(&self) -> f64;
}

pub type WormRef = Rc<dyn WormObject>;
pub type FoodRef = Rc<dyn FoodObject>;

/// Which kind of world object an entity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Worm,
    Food,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Worm => f.write_str("worm"),
            EntityKind::Food => f.write_str("food"),
        }
    }
}

/// A reference to a world object.
#[derive(Debug, Clone)]
pub enum Entity {
    Worm(WormRef),
    Food(FoodRef),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Worm(_) => EntityKind::Worm,
            Entity::Food(_) => EntityKind::Food,
        }
    }

    /// Whether both handles point at the same world object.
    pub fn same_object(&self, other: &Entity) -> bool {
        match (self, other) {
            (Entity::Worm(a), Entity::Worm(b)) => Rc::ptr_eq(a, b),
            (Entity::Food(a), Entity::Food(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Read a numeric property from the live object.
    ///
    /// Food only has a position and a radius.
    pub fn query(&self, property: Property) -> Result<f64, TypeError> {
        match self {
            Entity::Worm(worm) => Ok(match property {
                Property::X => worm.x(),
                Property::Y => worm.y(),
                Property::Radius => worm.radius(),
                Property::Direction => worm.direction(),
                Property::HitPoints => worm.hit_points() as f64,
                Property::MaxHitPoints => worm.max_hit_points() as f64,
                Property::ActionPoints => worm.action_points() as f64,
                Property::MaxActionPoints => worm.max_action_points() as f64,
            }),
            Entity::Food(food) => match property {
                Property::X => Ok(food.x()),
                Property::Y => Ok(food.y()),
                Property::Radius => Ok(food.radius()),
                _ => Err(TypeError::UnsupportedProperty {
                    property,
                    entity: EntityKind::Food,
                }),
            },
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Worm(worm) => write!(f, "worm {}", worm.name()),
            Entity::Food(_) => f.write_str("food"),
        }
    }
}
