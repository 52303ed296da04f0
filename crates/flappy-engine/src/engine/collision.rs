use crate::{
    GameConfig,
    core::{Agent, CollisionKind, Rect},
};

use super::obstacle_field::ObstacleField;

/// Spatial test of agents against obstacles and the land bands.
///
/// Both the agent's box and the obstacle's box are shrunk by
/// [`GameConfig::collision_ratio`] around their centers before the overlap
/// test, so grazing contacts are forgiven.
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    ratio: f32,
    ceiling: Rect,
    ground: Rect,
}

impl CollisionIndex {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let ratio = config.collision_ratio;
        let ceiling = Rect::new(0.0, 0.0, config.screen_width, config.land_thickness);
        let ground = Rect::new(
            0.0,
            config.screen_height - config.land_thickness,
            config.screen_width,
            config.land_thickness,
        );
        Self {
            ratio,
            ceiling: ceiling.scaled(ratio),
            ground: ground.scaled(ratio),
        }
    }

    /// Returns what `agent` currently overlaps, if anything.
    ///
    /// Every pair of the field is tested, including pairs the lead agent has
    /// already passed.
    #[must_use]
    pub fn test(&self, agent: &Agent, field: &ObstacleField) -> Option<CollisionKind> {
        let hitbox = agent.rect().scaled(self.ratio);
        if hitbox.intersects(&self.ceiling) {
            return Some(CollisionKind::Ceiling);
        }
        if hitbox.intersects(&self.ground) {
            return Some(CollisionKind::Ground);
        }
        field
            .pairs()
            .flat_map(|pair| pair.rects())
            .any(|rect| hitbox.intersects(&rect.scaled(self.ratio)))
            .then_some(CollisionKind::Obstacle)
    }
}
