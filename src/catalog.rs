use bevy::math::Vec3;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::error::WaveError;
use crate::graph::{GraphModel, NodeId};
use crate::wave::WaveConfig;

const SKY_JSON: &str = include_str!("../assets/constellations/sky.json");

/// Radius of the sky sphere stars are projected onto
pub const SKY_RADIUS: f32 = 400.0;

/// Constellations plus the wave settings they should animate with
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    items: Vec<ConstellationData>,
    #[serde(default)]
    pub wave: WaveConfig,
    /// Start every constellation's wave as soon as the app runs
    #[serde(default)]
    pub open_on_start: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstellationData {
    pub name: String,
    /// Right ascension of the constellation's centre, hours
    pub ra: f32,
    /// Declination of the constellation's centre, degrees
    pub dec: f32,
    pub pairs: Vec<StarPair>,
    pub stars: Vec<StarData>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StarPair {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarData {
    pub id: usize,
    pub ra: f32,
    pub dec: f32,
    /// Visual size factor
    pub magnitude: f32,
    /// Hex colour without the leading '#'
    pub color: String,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self, WaveError> {
        Self::from_json(SKY_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, WaveError> {
        let catalog: Catalog = serde_json::from_str(json)
            .map_err(|e| WaveError::Config(format!("catalog parse error: {}", e)))?;

        if catalog.items.is_empty() {
            return Err(WaveError::Config("catalog has no constellations".to_string()));
        }
        catalog.wave.validate()?;

        Ok(catalog)
    }

    /// Constellations in file order; never empty
    pub fn items(&self) -> &[ConstellationData] {
        &self.items
    }
}

impl ConstellationData {
    /// Where the constellation's centre sits on the sky sphere
    pub fn world_pos(&self) -> Vec3 {
        ra_dec_to_position(self.ra, self.dec, SKY_RADIUS)
    }

    pub fn star(&self, id: NodeId) -> Option<&StarData> {
        self.stars.iter().find(|star| star.id == id.index())
    }

    /// Graph over the stars that take part in at least one pair
    ///
    /// Nodes keep the order in which pairs first mention them; edges keep
    /// the pair order. A pair naming an unlisted star is a config error.
    pub fn to_graph(&self) -> Result<GraphModel, WaveError> {
        let stars: HashMap<usize, &StarData> =
            self.stars.iter().map(|star| (star.id, star)).collect();

        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for pair in &self.pairs {
            for id in [pair.from, pair.to] {
                let Some(star) = stars.get(&id) else {
                    return Err(WaveError::Config(format!(
                        "{}: pair {}-{} names unknown star {}",
                        self.name, pair.from, pair.to, id
                    )));
                };
                if seen.insert(id) {
                    nodes.push((NodeId(id), star.world_pos()));
                }
            }
        }

        let edges = self.pairs.iter().map(|pair| (NodeId(pair.from), NodeId(pair.to)));
        GraphModel::new(nodes, edges)
    }

    /// Star closest to the constellation's own sky position
    pub fn root(&self, graph: &GraphModel) -> NodeId {
        graph.select_root_nearest(self.world_pos())
    }
}

impl StarData {
    pub fn world_pos(&self) -> Vec3 {
        ra_dec_to_position(self.ra, self.dec, SKY_RADIUS)
    }
}

/// Project equatorial coordinates onto a sphere around the origin
/// `ra` is in hours (15° each), `dec` in degrees; +Y points at the celestial pole.
pub fn ra_dec_to_position(ra: f32, dec: f32, radius: f32) -> Vec3 {
    let ra = (ra * 15.0).to_radians();
    let dec = dec.to_radians();

    Vec3::new(
        radius * dec.cos() * ra.cos(),
        radius * dec.sin(),
        radius * dec.cos() * ra.sin(),
    )
}
