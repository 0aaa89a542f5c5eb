// sf-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    MolarConcentration as UomMolarConcentration, Pressure as UomPressure,
    ThermalConductivity as UomThermalConductivity,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
pub type MolarDensity = UomMolarConcentration;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type ThermalCond = UomThermalConductivity;

/// Molar flow rate [mol/s].
///
/// uom has no dedicated amount-per-time quantity, so this stays a plain f64.
pub type MolarFlow = f64;

/// Specific enthalpy, mass basis [J/kg].
pub type SpecEnthalpy = f64;

/// Specific enthalpy, molar basis [J/mol].
pub type MolarEnthalpy = f64;

/// Specific heat capacity, mass basis [J/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Specific heat capacity, molar basis [J/(mol·K)].
pub type MolarHeatCapacity = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mol_per_m3(v: f64) -> MolarDensity {
    use uom::si::molar_concentration::mole_per_cubic_meter;
    MolarDensity::new::<mole_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn w_per_m_k(v: f64) -> ThermalCond {
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;
    ThermalCond::new::<watt_per_meter_kelvin>(v)
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)].
    pub const R_UNIVERSAL: f64 = 8.314_462_618;

    /// Reference temperature for enthalpy datums [K].
    pub const T_REF_K: f64 = 298.15;

    /// Standard atmosphere [Pa].
    pub const P_ATM_PA: f64 = 101_325.0;
}
