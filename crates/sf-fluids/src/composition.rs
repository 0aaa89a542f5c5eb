//! Stream composition (ordered component fractions).

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use sf_core::numeric::{Tolerances, nearly_equal};

/// Composition of a stream as ordered `(component name, mole fraction)` pairs.
///
/// Fractions are stored exactly as given and passed straight to the property
/// engine as its mole-fraction vector. Insertion order is the vector order.
/// Names are stored as given. Lookups treat two names as the same component
/// when both parse to the same [`Species`] (`"water"`, `"Water"`, `"H2O"`), and
/// fall back to exact comparison otherwise. Whether a name is usable at all is
/// left to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    items: Vec<(String, f64)>,
}

impl Composition {
    /// Create a single-component composition with fraction 1.
    pub fn pure(name: impl Into<String>) -> Self {
        Self {
            items: vec![(name.into(), 1.0)],
        }
    }

    /// Create a composition from `(name, fraction)` pairs.
    ///
    /// Rejects empty input, blank or duplicate names, and fractions that are
    /// negative or non-finite. Fractions are not normalized.
    pub fn new<I, S>(fractions: I) -> FluidResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut items: Vec<(String, f64)> = Vec::new();
        for (name, frac) in fractions {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(FluidError::InvalidArg {
                    what: "blank component name",
                });
            }
            if items.iter().any(|(n, _)| same_component(n, &name)) {
                return Err(FluidError::InvalidArg {
                    what: "duplicate component name",
                });
            }
            if !frac.is_finite() {
                return Err(FluidError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if frac < 0.0 {
                return Err(FluidError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            items.push((name, frac));
        }

        if items.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "empty composition",
            });
        }

        let comp = Self { items };
        let sum = comp.sum();
        if !nearly_equal(sum, 1.0, Tolerances::new(1e-6, 1e-6)) {
            tracing::warn!(sum, "mole fractions do not sum to one");
        }
        Ok(comp)
    }

    /// Get the fraction of a component (0.0 if not present).
    pub fn fraction(&self, name: &str) -> f64 {
        self.items
            .iter()
            .find(|(n, _)| same_component(n, name))
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|(n, _)| same_component(n, name))
    }

    /// Number of distinct components.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed composition; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Component names in vector order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|(n, _)| n.as_str())
    }

    /// Fraction vector aligned with [`names`](Self::names).
    pub fn fractions(&self) -> Vec<f64> {
        self.items.iter().map(|(_, f)| *f).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(n, f)| (n.as_str(), *f))
    }

    pub fn sum(&self) -> f64 {
        self.items.iter().map(|(_, f)| f).sum()
    }

    /// Compare against another composition by name, ignoring order.
    pub fn same_fractions(&self, other: &Composition, tol: Tolerances) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, f)| other.contains(name) && nearly_equal(f, other.fraction(name), tol))
    }
}

fn same_component(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (a.parse::<Species>(), b.parse::<Species>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_composition() {
        let comp = Composition::pure("Water");
        assert_eq!(comp.len(), 1);
        assert_eq!(comp.fraction("Water"), 1.0);
        assert_eq!(comp.fraction("Ethanol"), 0.0);
    }

    #[test]
    fn preserves_insertion_order() {
        let comp = Composition::new([("Water", 0.7), ("Acetone", 0.3)]).unwrap();
        let names: Vec<&str> = comp.names().collect();
        assert_eq!(names, ["Water", "Acetone"]);
        assert_eq!(comp.fractions(), vec![0.7, 0.3]);
    }

    #[test]
    fn fractions_are_not_normalized() {
        let comp = Composition::new([("Water", 2.0), ("Ethanol", 8.0)]).unwrap();
        assert_eq!(comp.fraction("Water"), 2.0);
        assert_eq!(comp.sum(), 10.0);
    }

    #[test]
    fn rejects_empty() {
        let result = Composition::new(Vec::<(String, f64)>::new());
        assert_eq!(
            result,
            Err(FluidError::InvalidArg {
                what: "empty composition"
            })
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Composition::new([("Water", 0.5), ("Water", 0.5)]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_spelling_variants_of_one_species() {
        let result = Composition::new([("Water", 0.5), ("h2o", 0.5)]);
        assert_eq!(
            result,
            Err(FluidError::InvalidArg {
                what: "duplicate component name"
            })
        );
    }

    #[test]
    fn lookup_resolves_species_names() {
        let comp = Composition::new([("Water", 0.7), ("Acetone", 0.3)]).unwrap();
        assert_eq!(comp.fraction("water"), 0.7);
        assert_eq!(comp.fraction("propanone"), 0.3);
        assert!(comp.contains("H2O"));
        assert!(!comp.contains("Ethanol"));
    }

    #[test]
    fn unknown_names_match_exactly() {
        let comp = Composition::new([("Widget", 0.5), ("widget", 0.5)]).unwrap();
        assert_eq!(comp.fraction("Widget"), 0.5);
        assert_eq!(comp.fraction("WIDGET"), 0.0);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(Composition::new([("Water", -0.5), ("Ethanol", 1.5)]).is_err());
        assert!(Composition::new([("Water", f64::NAN)]).is_err());
        assert!(Composition::new([("  ", 1.0)]).is_err());
    }

    #[test]
    fn same_fractions_ignores_order() {
        let a = Composition::new([("Water", 0.7), ("Ethanol", 0.3)]).unwrap();
        let b = Composition::new([("Ethanol", 0.3), ("Water", 0.7)]).unwrap();
        let tol = Tolerances::new(1e-12, 1e-12);
        assert!(a.same_fractions(&b, tol));
        assert_ne!(a, b);

        let c = Composition::new([("Water", 0.7), ("Acetone", 0.3)]).unwrap();
        assert!(!a.same_fractions(&c, tol));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fractions_roundtrip_unchanged(fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..6)) {
            let names = ["Water", "Acetone", "Ethanol", "Methanol", "Benzene", "Toluene"];
            let input: Vec<(&str, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (names[i], f))
                .collect();

            let comp = Composition::new(input).unwrap();
            prop_assert_eq!(comp.fractions(), fracs);
            prop_assert_eq!(comp.len(), comp.names().count());
        }
    }
}
