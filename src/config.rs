use crate::error::{Error, Result};
use crate::globe::ControllerKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Lengths are fractions of the scene extent (half the smaller surface
/// side), so the same file works for any terminal size.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scene: SceneConfig,
    pub spheres: SpheresConfig,
    pub labels: LabelsConfig,
    pub globe: GlobeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Focal length as a multiple of the scene extent
    pub focal_ratio: f64,
    /// Target frames per second
    pub frame_rate: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            focal_ratio: 3.0,
            frame_rate: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpheresConfig {
    pub count: usize,
    pub orbit_radius: f64,
    pub radius: f64,
    /// Tilt of the orbit plane about X, in radians
    pub tilt: f64,
    /// Radians per second about X, Y and Z
    pub angular_velocity: [f64; 3],
    pub colors: Vec<String>,
}

impl Default for SpheresConfig {
    fn default() -> Self {
        SpheresConfig {
            count: 10,
            orbit_radius: 0.65,
            radius: 0.14,
            tilt: 0.35,
            angular_velocity: [0.0, 0.8, 0.0],
            colors: ["#3050d0", "#d04040", "#40b060", "#d0a030"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub words: Vec<String>,
    pub radius: f64,
    /// Font size as a fraction of the extent
    pub font_size: f64,
    pub angular_velocity: [f64; 3],
    pub color: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            words: [
                "rust", "sphere", "quaternion", "painter", "depth", "focal", "matrix", "euler",
                "arcball", "globe", "gradient", "canvas", "rotate", "project", "scene", "label",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            radius: 0.75,
            font_size: 0.08,
            angular_velocity: [0.15, 0.45, 0.0],
            color: "#a0d0ff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: f64,
    /// Spacing of graticule dots in degrees
    pub graticule_step: f64,
    pub dot_radius: f64,
    /// Idle rotation in radians per second
    pub spin_rate: f64,
    pub controller: ControllerKind,
    /// Optional JSON file of `{ name, lon, lat }` entries
    pub places: Option<PathBuf>,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        GlobeConfig {
            radius: 0.8,
            graticule_step: 15.0,
            dot_radius: 0.025,
            spin_rate: 0.25,
            controller: ControllerKind::default(),
            places: None,
        }
    }
}

impl Config {
    /// Loads a config file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                toml::from_str(&raw).map_err(|source| Error::Config {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("scene.focal_ratio", self.scene.focal_ratio),
            ("spheres.orbit_radius", self.spheres.orbit_radius),
            ("spheres.radius", self.spheres.radius),
            ("labels.radius", self.labels.radius),
            ("labels.font_size", self.labels.font_size),
            ("globe.radius", self.globe.radius),
            ("globe.graticule_step", self.globe.graticule_step),
            ("globe.dot_radius", self.globe.dot_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.scene.frame_rate == 0 {
            return Err(Error::InvalidConfig(
                "scene.frame_rate must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[scene]\nfocal_ratio = 5.0\n\n[globe]\ncontroller = \"matrix\"\nspin_rate = 0.0"
        )
        .unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.scene.focal_ratio, 5.0);
        assert_eq!(config.scene.frame_rate, 30);
        assert_eq!(config.globe.controller, ControllerKind::Matrix);
        assert_eq!(config.globe.spin_rate, 0.0);
        assert_eq!(config.spheres, SpheresConfig::default());
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scene]\nfocal_ratio = 0.0").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn syntax_errors_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scene\nfocal_ratio = ").unwrap();
        match Config::load(Some(file.path())) {
            Err(Error::Config { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
