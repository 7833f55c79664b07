// lf-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

// Accessors in the working units of the leaf models.

#[inline]
pub fn as_pa(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn as_kpa(p: Pressure) -> f64 {
    use uom::si::pressure::kilopascal;
    p.get::<kilopascal>()
}

#[inline]
pub fn as_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn as_mps(v: Velocity) -> f64 {
    use uom::si::velocity::meter_per_second;
    v.get::<meter_per_second>()
}

#[inline]
pub fn as_m(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_store_si_values() {
        assert_eq!(pa(101_325.0).value, 101_325.0);
        assert_eq!(as_mps(mps(2.5)), 2.5);
        assert!((as_m(m(0.02)) - 0.02).abs() < 1e-15);
    }

    #[test]
    fn celsius_round_trip() {
        let t = degc(25.0);
        assert!((as_degc(t) - 25.0).abs() < 1e-9);
        assert!((t.value - 298.15).abs() < 1e-9);
    }

    #[test]
    fn kilopascal_is_thousand_pascal() {
        assert!((as_pa(kpa(1.5)) - 1500.0).abs() < 1e-9);
        assert!((as_kpa(pa(101_325.0)) - 101.325).abs() < 1e-9);
    }
}
