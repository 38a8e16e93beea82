//! Map data: zones drawn as SVG polygons over the map image, and fixer markers placed at the
//! center of their zone.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point, Size};
use crate::foundation::error::{CineloreError, CineloreResult};

/// Territory polygon in map-image pixel coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Stable id referenced by fixers.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Fill color (any CSS color string).
    pub color: String,
    /// Outline color; falls back to `color`.
    #[serde(default)]
    pub border_color: Option<String>,
    /// SVG path data of the polygon.
    pub path: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Faction kind.
    #[serde(default)]
    pub faction_type: Option<String>,
    /// Faction leader.
    #[serde(default)]
    pub leader: Option<String>,
    /// Guiding principles listed in the detail panel.
    #[serde(default)]
    pub principles: Vec<String>,
}

impl Zone {
    /// Parsed outline.
    pub fn outline(&self) -> CineloreResult<BezPath> {
        BezPath::from_svg(&self.path).map_err(|e| {
            CineloreError::validation(format!("zone '{}': invalid path data: {e}", self.id))
        })
    }

    /// Average of the path's move/line vertices; the origin when there are none or the path
    /// does not parse.
    pub fn centroid(&self) -> Point {
        let Ok(path) = self.outline() else {
            return Point::ORIGIN;
        };
        let (sum, n) = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .fold((Point::ORIGIN.to_vec2(), 0u32), |(acc, n), p| {
                (acc + p.to_vec2(), n + 1)
            });
        if n == 0 {
            return Point::ORIGIN;
        }
        (sum / f64::from(n)).to_point()
    }

    /// Outline color, defaulting to the fill color.
    pub fn border(&self) -> &str {
        self.border_color.as_deref().unwrap_or(&self.color)
    }
}

/// Contact placed on the map as a marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixer {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Id of the zone the marker sits in.
    pub zone: String,
    /// Availability status.
    pub status: String,
    /// Clearance label.
    pub access_level: String,
    /// Specialty labels.
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit position used when the zone is unknown.
    #[serde(default)]
    pub position: Option<Point>,
}

fn default_map_size() -> Size {
    Size::new(700.0, 900.0)
}

/// Zones and fixers over one map image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    /// Map image path or URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Natural size of the map image (and viewBox of the zone overlay).
    #[serde(default = "default_map_size")]
    pub size: Size,
    /// Zones, in draw order.
    #[serde(default)]
    pub zones: Vec<Zone>,
    /// Fixers.
    #[serde(default)]
    pub fixers: Vec<Fixer>,
}

impl MapData {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CineloreResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CineloreError::serde(format!("parse map JSON: {e}")))
    }

    /// Parse from a JSON file and validate.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> CineloreResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CineloreError::validation(format!("open map JSON '{}': {e}", path.display()))
        })?;
        let data = Self::from_reader(BufReader::new(f))?;
        data.validate()?;
        tracing::debug!(
            zones = data.zones.len(),
            fixers = data.fixers.len(),
            "map data loaded"
        );
        Ok(data)
    }

    /// Reject duplicate ids, unparseable outlines and fixers in unknown zones.
    pub fn validate(&self) -> CineloreResult<()> {
        let mut zone_ids = HashSet::new();
        for z in &self.zones {
            if !zone_ids.insert(z.id.as_str()) {
                return Err(CineloreError::validation(format!(
                    "duplicate zone id '{}'",
                    z.id
                )));
            }
            z.outline()?;
        }

        let mut fixer_ids = HashSet::new();
        for f in &self.fixers {
            if !fixer_ids.insert(f.id.as_str()) {
                return Err(CineloreError::validation(format!(
                    "duplicate fixer id '{}'",
                    f.id
                )));
            }
            if !zone_ids.contains(f.zone.as_str()) {
                return Err(CineloreError::validation(format!(
                    "fixer '{}' references unknown zone '{}'",
                    f.id, f.zone
                )));
            }
        }
        Ok(())
    }

    /// Zone by id.
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Zone a fixer belongs to.
    pub fn zone_of(&self, fixer: &Fixer) -> Option<&Zone> {
        self.zone(&fixer.zone)
    }

    /// Fixers located in `zone_id`.
    pub fn fixers_in(&self, zone_id: &str) -> impl Iterator<Item = &Fixer> + '_ {
        let zone_id = zone_id.to_owned();
        self.fixers.iter().filter(move |f| f.zone == zone_id)
    }

    /// Map-space marker position: the zone centroid, else the fixer's explicit position.
    pub fn marker_position(&self, fixer: &Fixer) -> Option<Point> {
        self.zone_of(fixer)
            .map(Zone::centroid)
            .or(fixer.position)
    }
}

#[cfg(test)]
#[path = "../tests/unit/map.rs"]
mod tests;
