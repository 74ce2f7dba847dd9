use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::BumperError;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Bumper".into(),
            auto_close: 0.0,
        }
    }
}

/// Obstacle ring placement.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub obstacle_count: u32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub origin: [f32; 3],
    /// Edge length of the cube obstacles.
    pub obstacle_size: f32,
    /// Fixed seed for reproducible layouts; `None` draws from entropy.
    pub seed: Option<u64>,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            obstacle_count: 25,
            inner_radius: 5.0,
            outer_radius: 50.0,
            origin: [0.0, 0.5, 0.0],
            obstacle_size: 1.0,
            seed: None,
        }
    }
}
impl FieldConfig {
    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }
}

/// HSV window for fresh obstacles plus the colour they switch to once scored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObstacleColorConfig {
    pub hue_min: f32,
    pub hue_max: f32,
    pub value_min: f32,
    pub value_max: f32,
    pub scored: [f32; 3],
}
impl Default for ObstacleColorConfig {
    fn default() -> Self {
        Self {
            hue_min: 190.0,
            hue_max: 280.0,
            value_min: 0.5,
            value_max: 1.0,
            scored: [1.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    /// Degrees per second at full look deflection.
    pub rotation_speed: f32,
    pub radius: f32,
    pub spawn: [f32; 3],
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            rotation_speed: 90.0,
            radius: 0.5,
            spawn: [0.0, 0.5, 0.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FollowerConfig {
    pub enabled: bool,
    pub speed: f32,
    pub separation: f32,
    pub spawn: [f32; 3],
}
impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            separation: 1.0,
            spawn: [3.0, 0.5, 3.0],
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct BumperConfig {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub colors: ObstacleColorConfig,
    pub player: PlayerConfig,
    pub follower: FollowerConfig,
    pub rapier_debug: bool,
}
impl Default for BumperConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            field: Default::default(),
            colors: Default::default(),
            player: Default::default(),
            follower: Default::default(),
            rapier_debug: false,
        }
    }
}

impl BumperConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, BumperError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| BumperError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| BumperError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge several RON files key by key (later files win) and deserialize the result.
    /// Returns the config, the files that contributed, and every failure encountered.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<BumperError>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        if let Some((_, existing)) = bm.iter_mut().find(|(ek, _)| **ek == k) {
                            if let Some(val) = incoming.take() {
                                merge_value(existing, val);
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(source) => errors.push(BumperError::ConfigParse {
                        path: path_ref.to_path_buf(),
                        source,
                    }),
                },
                Err(source) => errors.push(BumperError::ConfigRead {
                    path: path_ref.to_path_buf(),
                    source,
                }),
            }
        }

        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<BumperConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(source) => {
                errors.push(BumperError::ConfigMerge { source });
                (Self::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let f = &self.field;
        if f.obstacle_count == 0 {
            w.push("field.obstacle_count is 0; nothing will spawn".into());
        }
        if f.obstacle_count > 10_000 {
            w.push(format!(
                "field.obstacle_count {} very high; performance may suffer",
                f.obstacle_count
            ));
        }
        if !f.inner_radius.is_finite() || !f.outer_radius.is_finite() {
            w.push(format!(
                "field radii must be finite (inner {}, outer {}); non-finite values become 0",
                f.inner_radius, f.outer_radius
            ));
        }
        if f.inner_radius < 0.0 || f.outer_radius < 0.0 {
            w.push(format!(
                "field radii must be >= 0 (inner {}, outer {}); negatives clamp to 0",
                f.inner_radius, f.outer_radius
            ));
        }
        if f.inner_radius > f.outer_radius {
            w.push(format!(
                "field.inner_radius ({}) greater than outer_radius ({}); bounds will be swapped",
                f.inner_radius, f.outer_radius
            ));
        }
        if f.obstacle_size <= 0.0 {
            w.push(format!("field.obstacle_size {} must be > 0", f.obstacle_size));
        }
        let c = &self.colors;
        if [c.hue_min, c.hue_max, c.value_min, c.value_max].iter().any(|v| !v.is_finite()) {
            w.push("colors bounds must be finite; non-finite values fall back to defaults".into());
        }
        if c.hue_min > c.hue_max {
            w.push(format!("colors.hue_min ({}) greater than hue_max ({})", c.hue_min, c.hue_max));
        }
        if c.value_min > c.value_max {
            w.push(format!(
                "colors.value_min ({}) greater than value_max ({})",
                c.value_min, c.value_max
            ));
        }
        if !(0.0..=1.0).contains(&c.value_min) || !(0.0..=1.0).contains(&c.value_max) {
            w.push("colors.value_min/value_max outside 0..1".into());
        }
        if self.player.speed <= 0.0 {
            w.push(format!("player.speed {} must be > 0", self.player.speed));
        }
        if self.player.radius <= 0.0 {
            w.push(format!("player.radius {} must be > 0", self.player.radius));
        }
        if self.follower.enabled && self.follower.separation < 0.0 {
            w.push(format!(
                "follower.separation {} negative; follower will never stop",
                self.follower.separation
            ));
        }
        w
    }
}
