//! Chemical species definitions.

/// Chemical species the bundled engines know how to resolve.
///
/// Stream compositions are keyed by name; engines parse those names into a
/// `Species` and reject anything that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Water (H₂O)
    Water,
    /// Acetone (C₃H₆O)
    Acetone,
    /// Ethanol (C₂H₅OH)
    Ethanol,
    /// Methanol (CH₃OH)
    Methanol,
    /// Benzene (C₆H₆)
    Benzene,
    /// Toluene (C₇H₈)
    Toluene,
    /// n-Hexane
    NHexane,
    /// n-Heptane
    NHeptane,
    /// Ammonia (NH₃)
    Ammonia,
    /// Propane
    Propane,
    /// n-Butane
    NButane,
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Methane (CH₄)
    CH4,
    /// Argon (Ar)
    Ar,
}

impl Species {
    pub const ALL: [Species; 16] = [
        Species::Water,
        Species::Acetone,
        Species::Ethanol,
        Species::Methanol,
        Species::Benzene,
        Species::Toluene,
        Species::NHexane,
        Species::NHeptane,
        Species::Ammonia,
        Species::Propane,
        Species::NButane,
        Species::N2,
        Species::O2,
        Species::CO2,
        Species::CH4,
        Species::Ar,
    ];

    /// Canonical composition key. Parses back to the same species.
    pub fn key(&self) -> &'static str {
        match self {
            Species::Water => "Water",
            Species::Acetone => "Acetone",
            Species::Ethanol => "Ethanol",
            Species::Methanol => "Methanol",
            Species::Benzene => "Benzene",
            Species::Toluene => "Toluene",
            Species::NHexane => "nHexane",
            Species::NHeptane => "nHeptane",
            Species::Ammonia => "Ammonia",
            Species::Propane => "Propane",
            Species::NButane => "nButane",
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::CO2 => "CO2",
            Species::CH4 => "CH4",
            Species::Ar => "Ar",
        }
    }

    /// CoolProp fluid name used when building an `AbstractState`.
    pub fn coolprop_name(&self) -> &'static str {
        match self {
            Species::Water => "Water",
            Species::Acetone => "Acetone",
            Species::Ethanol => "Ethanol",
            Species::Methanol => "Methanol",
            Species::Benzene => "Benzene",
            Species::Toluene => "Toluene",
            Species::NHexane => "n-Hexane",
            Species::NHeptane => "n-Heptane",
            Species::Ammonia => "Ammonia",
            Species::Propane => "n-Propane",
            Species::NButane => "n-Butane",
            Species::N2 => "Nitrogen",
            Species::O2 => "Oxygen",
            Species::CO2 => "CarbonDioxide",
            Species::CH4 => "Methane",
            Species::Ar => "Argon",
        }
    }

    /// Get molar mass [kg/kmol] for this species.
    ///
    /// Values sourced from standard reference data (e.g., NIST).
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::Water => 18.015,
            Species::Acetone => 58.080,
            Species::Ethanol => 46.069,
            Species::Methanol => 32.042,
            Species::Benzene => 78.112,
            Species::Toluene => 92.139,
            Species::NHexane => 86.178,
            Species::NHeptane => 100.205,
            Species::Ammonia => 17.031,
            Species::Propane => 44.097,
            Species::NButane => 58.124,
            Species::N2 => 28.014,
            Species::O2 => 31.999,
            Species::CO2 => 44.010,
            Species::CH4 => 16.043,
            Species::Ar => 39.948,
        }
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WATER" | "H2O" => Ok(Species::Water),
            "ACETONE" | "PROPANONE" => Ok(Species::Acetone),
            "ETHANOL" | "C2H5OH" => Ok(Species::Ethanol),
            "METHANOL" | "CH3OH" => Ok(Species::Methanol),
            "BENZENE" | "C6H6" => Ok(Species::Benzene),
            "TOLUENE" => Ok(Species::Toluene),
            "NHEXANE" | "N-HEXANE" | "HEXANE" => Ok(Species::NHexane),
            "NHEPTANE" | "N-HEPTANE" | "HEPTANE" => Ok(Species::NHeptane),
            "AMMONIA" | "NH3" => Ok(Species::Ammonia),
            "PROPANE" | "N-PROPANE" | "C3H8" => Ok(Species::Propane),
            "NBUTANE" | "N-BUTANE" | "BUTANE" => Ok(Species::NButane),
            "N2" | "NITROGEN" => Ok(Species::N2),
            "O2" | "OXYGEN" => Ok(Species::O2),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "AR" | "ARGON" => Ok(Species::Ar),
            _ => Err("unknown species"),
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coolprop_mapping() {
        assert_eq!(Species::Water.coolprop_name(), "Water");
        assert_eq!(Species::NHexane.coolprop_name(), "n-Hexane");
        assert_eq!(Species::CO2.coolprop_name(), "CarbonDioxide");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("water".parse::<Species>().unwrap(), Species::Water);
        assert_eq!(" Acetone ".parse::<Species>().unwrap(), Species::Acetone);
        assert_eq!("C2H5OH".parse::<Species>().unwrap(), Species::Ethanol);
        assert!("Unobtainium".parse::<Species>().is_err());
    }

    #[test]
    fn canonical_keys_roundtrip() {
        for species in Species::ALL {
            let parsed = species
                .key()
                .parse::<Species>()
                .expect("canonical key should parse");
            assert_eq!(parsed, species);
        }
    }

    #[test]
    fn coolprop_names_parse_back() {
        for species in Species::ALL {
            assert_eq!(species.coolprop_name().parse::<Species>(), Ok(species));
        }
    }
}
