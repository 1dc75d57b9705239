//! Scene description types for Prism.
//!
//! A scene is an immutable list of spheres and point lights plus an optional
//! checkerboard floor. Scenes are either built in code (see
//! [`Scene::default_scene`]) or loaded from a JSON description.

use std::path::Path;

use prism_math::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene description error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Light intensity must be positive and finite, got {0}")]
    InvalidIntensity(f32),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Phong-style surface description.
///
/// `albedo` weights the diffuse, specular, reflected and refracted
/// contributions in that order. The weights are not normalized and may
/// exceed 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f32,

    /// (diffuse, specular, reflection, refraction) weights
    pub albedo: Vec4,

    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Phong shininess
    pub specular_exponent: f32,
}

impl Material {
    pub const fn new(
        refractive_index: f32,
        albedo: Vec4,
        diffuse_color: Color,
        specular_exponent: f32,
    ) -> Self {
        Self {
            refractive_index,
            albedo,
            diffuse_color,
            specular_exponent,
        }
    }

    /// Check that the weights are non-negative, the refractive index is
    /// positive and the specular exponent is not negative.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.albedo.is_finite() || self.albedo.min_element() < 0.0 {
            return Err(SceneError::InvalidMaterial(format!(
                "albedo weights must be non-negative and finite, got {}",
                self.albedo
            )));
        }
        if !(self.refractive_index.is_finite() && self.refractive_index > 0.0) {
            return Err(SceneError::InvalidMaterial(format!(
                "refractive index must be positive and finite, got {}",
                self.refractive_index
            )));
        }
        if !(self.specular_exponent.is_finite() && self.specular_exponent >= 0.0) {
            return Err(SceneError::InvalidMaterial(format!(
                "specular exponent must be non-negative and finite, got {}",
                self.specular_exponent
            )));
        }
        if !self.diffuse_color.is_finite() {
            return Err(SceneError::InvalidMaterial(format!(
                "diffuse color must be finite, got {}",
                self.diffuse_color
            )));
        }
        Ok(())
    }

    /// Purely diffuse material of the given color.
    pub const fn diffuse(diffuse_color: Color) -> Self {
        Self::new(1.0, Vec4::new(1.0, 0.0, 0.0, 0.0), diffuse_color, 0.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::ZERO)
    }
}

/// The fixed table of named materials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Ivory,
    Glass,
    RedRubber,
    Mirror,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Ivory,
        MaterialKind::Glass,
        MaterialKind::RedRubber,
        MaterialKind::Mirror,
    ];

    pub const fn material(self) -> Material {
        match self {
            MaterialKind::Ivory => Material::new(
                1.0,
                Vec4::new(0.6, 0.3, 0.1, 0.0),
                Color::new(0.4, 0.4, 0.3),
                50.0,
            ),
            MaterialKind::Glass => Material::new(
                1.5,
                Vec4::new(0.0, 0.5, 0.1, 0.8),
                Color::new(0.6, 0.7, 0.8),
                125.0,
            ),
            MaterialKind::RedRubber => Material::new(
                1.0,
                Vec4::new(0.9, 0.1, 0.0, 0.0),
                Color::new(0.3, 0.1, 0.1),
                10.0,
            ),
            // Specular weight > 1 gives the mirror its glow
            MaterialKind::Mirror => Material::new(
                1.0,
                Vec4::new(0.0, 10.0, 0.8, 0.0),
                Color::new(1.0, 1.0, 1.0),
                1425.0,
            ),
        }
    }
}

impl From<MaterialKind> for Material {
    fn from(kind: MaterialKind) -> Self {
        kind.material()
    }
}

/// A sphere primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and the material valid.
    pub fn new(center: Vec3, radius: f32, material: impl Into<Material>) -> SceneResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        let material = material.into();
        material.validate()?;
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    position: Vec3,
    intensity: f32,
}

impl Light {
    /// Create a new light. The intensity must be positive.
    pub fn new(position: Vec3, intensity: f32) -> SceneResult<Self> {
        if !(intensity.is_finite() && intensity > 0.0) {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        Ok(Self {
            position,
            intensity,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// Rectangular extent of the floor in the XZ plane (open bounds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// The floor spans `-half_width < x < half_width`
    pub half_width: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Footprint {
    pub fn contains(&self, p: Vec3) -> bool {
        p.x.abs() < self.half_width && p.z > self.z_min && p.z < self.z_max
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            half_width: 10.0,
            z_min: -30.0,
            z_max: -10.0,
        }
    }
}

/// Horizontal checkerboard plane at `y = height`.
///
/// With `footprint: None` the plane is infinite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkerboard {
    pub height: f32,
    pub footprint: Option<Footprint>,
    /// Colors of the odd and even squares
    pub colors: [Color; 2],
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            height: -4.0,
            footprint: Some(Footprint::default()),
            colors: [Color::new(0.3, 0.3, 0.3), Color::new(0.3, 0.2, 0.1)],
        }
    }
}

impl Checkerboard {
    /// Infinite variant of this floor.
    pub fn unbounded(mut self) -> Self {
        self.footprint = None;
        self
    }

    pub fn in_footprint(&self, p: Vec3) -> bool {
        self.footprint.map_or(true, |f| f.contains(p))
    }

    /// Squares are 2 units wide; parity of floor(x/2) + floor(z/2) picks the color.
    pub fn color_at(&self, p: Vec3) -> Color {
        let cell = (0.5 * p.x).floor() as i64 + (0.5 * p.z).floor() as i64;
        if cell & 1 == 1 {
            self.colors[0]
        } else {
            self.colors[1]
        }
    }

    /// Material synthesized for a hit at `p`: diffuse only.
    pub fn material_at(&self, p: Vec3) -> Material {
        Material::diffuse(self.color_at(p))
    }
}

/// Complete immutable scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub floor: Option<Checkerboard>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>, floor: Option<Checkerboard>) -> Self {
        Self {
            spheres,
            lights,
            floor,
        }
    }

    /// The reference composition: four spheres, three lights, bounded floor.
    ///
    /// Built from constants, so it skips the validation a loaded
    /// description goes through.
    pub fn default_scene() -> Self {
        let description = SceneDescription::default();
        let spheres = description
            .spheres
            .iter()
            .map(|s| Sphere {
                center: s.center,
                radius: s.radius,
                material: s.material.resolve(),
            })
            .collect();
        let lights = description
            .lights
            .iter()
            .map(|l| Light {
                position: l.position,
                intensity: l.intensity,
            })
            .collect();

        Self::new(spheres, lights, description.floor)
    }

    pub fn with_floor(mut self, floor: Option<Checkerboard>) -> Self {
        self.floor = floor;
        self
    }

    /// Validate a deserialized description into a scene.
    pub fn from_description(description: &SceneDescription) -> SceneResult<Self> {
        let spheres = description
            .spheres
            .iter()
            .map(|s| Sphere::new(s.center, s.radius, s.material.resolve()))
            .collect::<SceneResult<Vec<_>>>()?;
        let lights = description
            .lights
            .iter()
            .map(|l| Light::new(l.position, l.intensity))
            .collect::<SceneResult<Vec<_>>>()?;

        Ok(Self::new(spheres, lights, description.floor))
    }

    /// Parse a JSON scene description.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let description: SceneDescription = serde_json::from_str(json)?;
        Self::from_description(&description)
    }

    /// Load a JSON scene description from disk.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;

        log::info!(
            "Loaded scene {}: {} spheres, {} lights, floor {}",
            path.display(),
            scene.spheres.len(),
            scene.lights.len(),
            if scene.floor.is_some() { "on" } else { "off" }
        );

        Ok(scene)
    }
}

// =============================================================================
// JSON description
// =============================================================================

/// Sphere material given by name (`"glass"`) or inline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialSpec {
    Named(MaterialKind),
    Inline(Material),
}

impl MaterialSpec {
    pub fn resolve(&self) -> Material {
        match *self {
            MaterialSpec::Named(kind) => kind.material(),
            MaterialSpec::Inline(material) => material,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: Vec3,
    pub intensity: f32,
}

/// On-disk scene layout.
///
/// A missing `floor` key gives the default checkerboard; `"floor": null`
/// removes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub spheres: Vec<SphereDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    #[serde(default = "default_floor")]
    pub floor: Option<Checkerboard>,
}

fn default_floor() -> Option<Checkerboard> {
    Some(Checkerboard::default())
}

impl Default for SceneDescription {
    fn default() -> Self {
        let sphere = |center: Vec3, radius: f32, kind: MaterialKind| SphereDescription {
            center,
            radius,
            material: MaterialSpec::Named(kind),
        };
        let light = |position: Vec3, intensity: f32| LightDescription {
            position,
            intensity,
        };

        Self {
            spheres: vec![
                sphere(Vec3::new(-3.0, 0.0, -16.0), 2.0, MaterialKind::Ivory),
                sphere(Vec3::new(-1.0, -1.5, -12.0), 2.0, MaterialKind::Glass),
                sphere(Vec3::new(1.5, -0.5, -18.0), 3.0, MaterialKind::RedRubber),
                sphere(Vec3::new(7.0, 5.0, -18.0), 4.0, MaterialKind::Mirror),
            ],
            lights: vec![
                light(Vec3::new(-20.0, 20.0, 20.0), 1.5),
                light(Vec3::new(30.0, 50.0, -25.0), 1.8),
                light(Vec3::new(30.0, 20.0, 30.0), 1.7),
            ],
            floor: default_floor(),
        }
    }
}
