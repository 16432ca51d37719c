use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// A named point on the globe, in degrees
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Place {
    /// Finite longitude and a latitude within the poles
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite() && self.lat.abs() <= 90.0
    }
}

/// Reads a JSON array of places
pub fn load_places(path: &Path) -> Result<Vec<Place>> {
    let raw = std::fs::read_to_string(path)?;
    let places: Vec<Place> = serde_json::from_str(&raw).map_err(|source| Error::Places {
        path: path.to_path_buf(),
        source,
    })?;
    let (valid, invalid): (Vec<_>, Vec<_>) = places.into_iter().partition(Place::is_valid);
    for p in &invalid {
        log::warn!(
            "skipping place {:?}: lon {} / lat {} is not a valid coordinate",
            p.name,
            p.lon,
            p.lat
        );
    }
    Ok(valid)
}

/// Like `load_places`, but a missing or broken file only costs the labels.
///
/// The globe keeps spinning without them.
pub fn load_places_or_empty(path: Option<&Path>) -> Vec<Place> {
    let Some(path) = path else {
        return Vec::new();
    };
    match load_places(path) {
        Ok(places) => {
            log::info!("loaded {} places from {}", places.len(), path.display());
            places
        }
        Err(e) => {
            log::warn!("{e}; showing the globe without places");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn loads_valid_places_and_drops_bad_latitudes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Oslo", "lon": 10.75, "lat": 59.91}},
               {{"name": "Nowhere", "lon": 0.0, "lat": 120.0}}]"#
        )
        .unwrap();
        let places = load_places(file.path()).unwrap();
        assert_eq!(
            places,
            vec![Place {
                name: "Oslo".to_string(),
                lon: 10.75,
                lat: 59.91
            }]
        );
    }

    #[test]
    fn validity_checks_both_coordinates() {
        let place = |lon: f64, lat: f64| Place {
            name: "x".to_string(),
            lon,
            lat,
        };
        assert!(place(179.0, -90.0).is_valid());
        assert!(!place(f64::INFINITY, 10.0).is_valid());
        assert!(!place(10.0, f64::NAN).is_valid());
        assert!(!place(10.0, 90.5).is_valid());
    }

    #[test]
    fn malformed_json_is_a_places_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = load_places(file.path());
        assert!(matches!(result, Err(Error::Places { .. })));
    }

    #[test]
    fn failures_fall_back_to_no_places() {
        let missing = Path::new("/definitely/not/here/places.json");
        assert!(load_places_or_empty(Some(missing)).is_empty());
        assert!(load_places_or_empty(None).is_empty());
    }
}
