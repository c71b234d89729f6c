//! Tunables for the road scene: speed, geometry and asset locations.

use crate::error::ConfigError;

const CAR_SPRITE_URL: &str = "../assets/sprites/car.png";
const ROAD_SPRITE_URL: &str = "../assets/backgrounds/road.png";
const BUILDING_SPRITE_PREFIX: &str = "../assets/buildings/building";
const BLOG_DATA_URL: &str = "../data/blogs.json";
const BUILDING_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarLayout {
    pub width: f64,
    pub height: f64,
    /// Distance from the viewport centre to the car's left edge.
    pub center_offset: f64,
    /// Distance from the viewport bottom to the car's top edge.
    pub bottom_offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingLayout {
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    pub first_x: f64,
    pub bottom_offset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Pixels per frame.
    pub speed: f64,
    pub car: CarLayout,
    pub building: BuildingLayout,
    pub building_count: usize,
    pub car_sprite_url: String,
    pub road_sprite_url: String,
    /// Building `i` loads `{prefix}{i + 1}.png`.
    pub building_sprite_prefix: String,
    pub blog_data_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 2.0,
            car: CarLayout {
                width: 100.0,
                height: 50.0,
                center_offset: 50.0,
                bottom_offset: 100.0,
            },
            building: BuildingLayout {
                width: 100.0,
                height: 150.0,
                spacing: 300.0,
                first_x: 200.0,
                bottom_offset: 250.0,
            },
            building_count: BUILDING_COUNT,
            car_sprite_url: CAR_SPRITE_URL.to_string(),
            road_sprite_url: ROAD_SPRITE_URL.to_string(),
            building_sprite_prefix: BUILDING_SPRITE_PREFIX.to_string(),
            blog_data_url: BLOG_DATA_URL.to_string(),
        }
    }
}

impl Config {
    /// Sprite path for building `index` (zero based); files are numbered from 1.
    pub fn building_sprite_url(&self, index: usize) -> String {
        format!("{}{}.png", self.building_sprite_prefix, index + 1)
    }

    pub fn building_sprite_urls(&self) -> Vec<String> {
        (0..self.building_count)
            .map(|i| self.building_sprite_url(i))
            .collect()
    }

    /// Applies overrides from a `location.search` string such as `?speed=3`.
    ///
    /// Unknown keys are ignored. A rejected value leaves the current setting in place.
    pub fn apply_query(&mut self, search: &str) -> Result<(), ConfigError> {
        let search = search.strip_prefix('?').unwrap_or(search);
        for pair in search.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == "speed" {
                self.speed = parse_speed(value)?;
            }
        }
        Ok(())
    }
}

fn parse_speed(value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(speed) if speed.is_finite() && speed > 0.0 => Ok(speed),
        _ => Err(ConfigError::InvalidSpeed(value.to_string())),
    }
}
