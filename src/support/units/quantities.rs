use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P3, Z0},
};

/// Thermal resistance, K/W in SI.
///
/// The reciprocal of [`uom::si::f64::ThermalConductance`]; converting between
/// the two is a `recip()` call.
pub type ThermalResistance = Quantity<ISQ<N2, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Temperature rate of change, K/s in SI.
///
/// The quantity produced by dividing a net heat flow by a heat capacity, and
/// the derivative the transient solver integrates.
pub type TemperatureRate = Quantity<ISQ<Z0, Z0, N1, Z0, P1, Z0, Z0>, SI<f64>, f64>;

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, HeatCapacity, Length, Power, ThermalConductivity, Time},
        heat_capacity::joule_per_kelvin,
        length::millimeter,
        power::watt,
        temperature_interval::kelvin as delta_kelvin,
        thermal_conductivity::watt_per_meter_kelvin,
        time::second,
    };

    #[test]
    fn resistance_arises_from_conduction_arithmetic() {
        let thickness = Length::new::<millimeter>(0.91);
        let conductivity = ThermalConductivity::new::<watt_per_meter_kelvin>(16.2);
        let area = Area::new::<square_meter>(0.025);

        let resistance: ThermalResistance = thickness / (conductivity * area);
        assert_relative_eq!(resistance.value, 0.91e-3 / (16.2 * 0.025));

        let conductance = resistance.recip();
        assert_relative_eq!(conductance.value, (16.2 * 0.025) / 0.91e-3, max_relative = 1e-12);
    }

    #[test]
    fn rate_times_time_is_an_interval() {
        let rate: TemperatureRate =
            Power::new::<watt>(100.0) / HeatCapacity::new::<joule_per_kelvin>(1000.0);
        let rise = rate * Time::new::<second>(30.0);
        assert_relative_eq!(rise.get::<delta_kelvin>(), 3.0);
    }
}
