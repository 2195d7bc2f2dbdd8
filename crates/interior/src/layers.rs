//! Layer manager: pairs layer masses with their materials, densest first

use materials::Material;

use crate::error::ConfigurationError;

/// One shell of the body.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'m> {
    /// Total mass of the layer (kg)
    pub mass: f64,
    pub material: &'m dyn Material,
}

/// Pair each mass with its material and order the pairs from the densest
/// (index 0, the core) to the least dense (the surface layer).
///
/// The sort is stable, so layers with equal base densities keep the order
/// they were given in.
pub fn sort_layers<'m>(
    masses: &[f64],
    materials: &[&'m dyn Material],
) -> Result<Vec<Layer<'m>>, ConfigurationError> {
    if masses.len() != materials.len() {
        return Err(ConfigurationError::LengthMismatch {
            masses: masses.len(),
            materials: materials.len(),
        });
    }
    if masses.is_empty() {
        return Err(ConfigurationError::EmptyComposition);
    }
    if let Some((index, &mass)) = masses
        .iter()
        .enumerate()
        .find(|(_, mass)| !(mass.is_finite() && **mass > 0.0))
    {
        return Err(ConfigurationError::NonPositiveMass { index, mass });
    }

    let mut layers: Vec<Layer<'m>> = masses
        .iter()
        .zip(materials)
        .map(|(&mass, &material)| Layer { mass, material })
        .collect();
    layers.sort_by(|a, b| {
        b.material
            .base_density()
            .total_cmp(&a.material.base_density())
    });
    Ok(layers)
}

/// Ordered layers of a body, core first.
///
/// # Examples
///
/// ```
/// use interior::Composition;
/// use materials::{catalog, Material};
///
/// let iron = catalog::iron();
/// let rock = catalog::silicate();
/// let earth = Composition::new(&[4.0e24, 1.9e24], &[&rock, &iron]).unwrap();
///
/// assert_eq!(earth.layers()[0].material.name(), "Iron");
/// assert!((earth.total_mass() - 5.9e24).abs() < 1e12);
/// ```
#[derive(Debug, Clone)]
pub struct Composition<'m> {
    layers: Vec<Layer<'m>>,
}

impl<'m> Composition<'m> {
    pub fn new(masses: &[f64], materials: &[&'m dyn Material]) -> Result<Self, ConfigurationError> {
        Ok(Self {
            layers: sort_layers(masses, materials)?,
        })
    }

    pub fn layers(&self) -> &[Layer<'m>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.layers.iter().map(|layer| layer.mass).sum()
    }

    /// Mass of layers `0..=index`, the enclosed mass at the outer edge of
    /// layer `index`.
    pub fn cumulative_mass(&self, index: usize) -> f64 {
        self.layers
            .iter()
            .take(index + 1)
            .map(|layer| layer.mass)
            .sum()
    }
}
