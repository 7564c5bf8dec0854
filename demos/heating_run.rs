//! Solves the reference rig's logged heating run and reports how the
//! simulation tracks the thermocouple measurements, then sweeps the bucket
//! wall thickness.
//!
//! Run with `cargo run --example heating_run`.

use std::error::Error;

use uom::si::f64::{Length, Time};
use uom::si::length::millimeter;
use uom::si::ratio::percent;
use uom::si::thermodynamic_temperature::degree_celsius;
use uom::si::time::{minute, second};

use waterbath_models::models::thermal::water_bath::{
    self, WaterBath, reference_measurements, reference_rig,
};
use waterbath_models::support::network::{SolveConfig, TimeGrid};
use waterbath_models::support::validation::Comparison;

fn main() -> Result<(), Box<dyn Error>> {
    let rig = WaterBath::new(reference_rig())?;
    let grid = TimeGrid::uniform(Time::new::<second>(8100.0), Time::new::<second>(300.0))?;
    let config = SolveConfig::default();

    let solution = rig.solve(&grid, &config)?;
    let logs = reference_measurements();

    println!("time (min)  bath sim (C)  bath log (C)  inner sim (C)  inner log (C)");
    let bath = solution.bath_series_celsius();
    let inner = solution.inner_series_celsius();
    for (i, &(time, bath_sim)) in bath.iter().enumerate() {
        println!(
            "{:>10.0}  {:>12.2}  {:>12.1}  {:>13.2}  {:>13.1}",
            time.get::<minute>(),
            bath_sim,
            logs.bath.values()[i],
            inner[i].1,
            logs.inner.values()[i],
        );
    }

    println!();
    report("bath", &solution.validate_bath(&logs.bath)?);
    report("inner fluid", &solution.validate_inner(&logs.inner)?);

    println!();
    println!("bucket wall thickness sweep, bath temperature after 135 min:");
    let thicknesses: Vec<Length> = (1..=10)
        .map(|mm| Length::new::<millimeter>(f64::from(mm)))
        .collect();
    let sweep = water_bath::sweep_wall_thickness(&reference_rig(), thicknesses, &grid, &config);
    for point in &sweep.points {
        let thickness = point.value.get::<millimeter>();
        match &point.outcome {
            Ok(run) => {
                let final_bath = run
                    .final_bath_temperature()
                    .map_or(f64::NAN, |t| t.get::<degree_celsius>());
                println!("  {thickness:>4.0} mm  {final_bath:>6.2} C");
            }
            Err(error) => println!("  {thickness:>4.0} mm  failed: {error}"),
        }
    }

    Ok(())
}

fn report(label: &str, comparison: &Comparison) {
    match &comparison.stats {
        Some(stats) => println!(
            "{label}: mean error {:.2}%, max {:.2}%, min {:.2}%",
            stats.mean.get::<percent>(),
            stats.max.get::<percent>(),
            stats.min.get::<percent>(),
        ),
        None => println!("{label}: no defined error points"),
    }
}
