//! Entity model and per-frame simulation for the road scene.
//!
//! Nothing here touches the DOM; the renderer reads positions back out of
//! [`World`] after each [`World::tick`].

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which sprite an entity draws with. Buildings carry their sprite index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Car,
    Building(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Entity {
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Horizontal-only AABB test. Half-open spans `[x, x + width)`; touching edges
/// do not overlap. The vertical axis is ignored.
#[inline]
pub fn horizontal_overlap(a: &Entity, b: &Entity) -> bool {
    a.right() > b.x && a.x < b.right()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    Hidden,
    Shown { building: usize },
}

pub struct World {
    viewport: Viewport,
    speed: f64,
    car: Entity,
    buildings: Vec<Entity>,
    reveal: Reveal,
}

impl World {
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        let car = Entity {
            kind: EntityKind::Car,
            x: viewport.width / 2.0 - config.car.center_offset,
            y: viewport.height - config.car.bottom_offset,
            width: config.car.width,
            height: config.car.height,
        };

        let layout = config.building;
        let buildings = (0..config.building_count)
            .map(|i| Entity {
                kind: EntityKind::Building(i),
                x: i as f64 * layout.spacing + layout.first_x,
                y: viewport.height - layout.bottom_offset,
                width: layout.width,
                height: layout.height,
            })
            .collect();

        Self {
            viewport,
            speed: config.speed,
            car,
            buildings,
            reveal: Reveal::Hidden,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Entities keep their positions; only wrap bounds and the road change.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn car(&self) -> &Entity {
        &self.car
    }

    pub fn buildings(&self) -> &[Entity] {
        &self.buildings
    }

    pub fn reveal(&self) -> Reveal {
        self.reveal
    }

    /// Draw order: car first, then buildings by index.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.car).chain(self.buildings.iter())
    }

    /// Advances one frame. Returns the building index the first time the car
    /// overlaps any building, and `None` on every other frame.
    pub fn tick(&mut self) -> Option<usize> {
        self.advance_car();

        if self.reveal != Reveal::Hidden {
            return None;
        }

        let building = self.first_overlap()?;
        self.reveal = Reveal::Shown { building };
        Some(building)
    }

    fn advance_car(&mut self) {
        self.car.x += self.speed;
        if self.car.x >= self.viewport.width {
            self.car.x = -self.car.width;
        }
    }

    fn first_overlap(&self) -> Option<usize> {
        self.buildings
            .iter()
            .position(|building| horizontal_overlap(&self.car, building))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_800x600() -> World {
        World::new(&Config::default(), Viewport::new(800.0, 600.0))
    }

    fn single_building_config() -> Config {
        Config {
            building_count: 1,
            ..Config::default()
        }
    }

    #[test]
    fn initial_layout_matches_viewport() {
        let world = world_800x600();
        let car = world.car();
        assert_eq!((car.x, car.y, car.width, car.height), (350.0, 500.0, 100.0, 50.0));

        let xs: Vec<f64> = world.buildings().iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![200.0, 500.0, 800.0]);
        assert!(world.buildings().iter().all(|b| b.y == 350.0));
        assert_eq!(world.buildings()[2].kind, EntityKind::Building(2));
        assert_eq!(world.reveal(), Reveal::Hidden);
    }

    #[test]
    fn entities_draw_car_before_buildings() {
        let world = world_800x600();
        let kinds: Vec<EntityKind> = world.entities().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Car,
                EntityKind::Building(0),
                EntityKind::Building(1),
                EntityKind::Building(2),
            ]
        );
    }

    #[test]
    fn overlap_is_horizontal_and_symmetric() {
        let car = Entity {
            kind: EntityKind::Car,
            x: 150.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
        };
        let far_below = Entity {
            kind: EntityKind::Building(0),
            x: 200.0,
            y: 10_000.0,
            width: 100.0,
            height: 150.0,
        };
        assert!(horizontal_overlap(&car, &far_below));
        assert!(horizontal_overlap(&far_below, &car));

        let touching = Entity { x: 250.0, ..far_below };
        assert!(!horizontal_overlap(&car, &touching));
        assert!(!horizontal_overlap(&touching, &car));
    }

    #[test]
    fn car_wraps_to_off_screen_left() {
        let mut world = world_800x600();
        for _ in 0..224 {
            world.tick();
        }
        assert_eq!(world.car().x, 798.0);
        world.tick();
        assert_eq!(world.car().x, -100.0);
        world.tick();
        assert_eq!(world.car().x, -98.0);
    }

    #[test]
    fn car_stays_in_bounds_across_resize() {
        let mut world = world_800x600();
        for frame in 0..5_000 {
            if frame == 1_000 {
                world.set_viewport(Viewport::new(300.0, 200.0));
            }
            if frame == 3_000 {
                world.set_viewport(Viewport::new(1200.0, 400.0));
            }
            world.tick();
            let x = world.car().x;
            assert!(x >= -world.car().width && x < world.viewport().width, "x = {}", x);
        }
    }

    #[test]
    fn resize_updates_viewport_only() {
        let mut world = world_800x600();
        let before = world.buildings().to_vec();
        world.set_viewport(Viewport::new(1200.0, 400.0));
        assert_eq!(world.viewport(), Viewport::new(1200.0, 400.0));
        assert_eq!(world.buildings(), &before[..]);
        assert_eq!(world.car().y, 500.0);
    }

    #[test]
    fn single_building_reveals_after_wrap() {
        let mut world = World::new(&single_building_config(), Viewport::new(800.0, 600.0));

        let mut fired = None;
        for _ in 0..1_000 {
            if let Some(index) = world.tick() {
                fired = Some((index, world.car().x));
                break;
            }
        }

        assert_eq!(fired, Some((0, 102.0)));
        assert_eq!(world.reveal(), Reveal::Shown { building: 0 });
    }

    #[test]
    fn default_layout_reveals_building_one_first() {
        let mut world = world_800x600();
        let mut fired = None;
        for _ in 0..1_000 {
            if let Some(index) = world.tick() {
                fired = Some((index, world.car().x));
                break;
            }
        }
        assert_eq!(fired, Some((1, 402.0)));
    }

    #[test]
    fn reveal_fires_once_per_session() {
        let mut world = world_800x600();
        let fired: Vec<usize> = (0..20_000).filter_map(|_| world.tick()).collect();
        assert_eq!(fired, vec![1]);
        assert_eq!(world.reveal(), Reveal::Shown { building: 1 });
    }

    #[test]
    fn no_buildings_never_reveals() {
        let config = Config {
            building_count: 0,
            ..Config::default()
        };
        let mut world = World::new(&config, Viewport::new(800.0, 600.0));
        assert!((0..2_000).all(|_| world.tick().is_none()));
        assert_eq!(world.reveal(), Reveal::Hidden);
    }
}
