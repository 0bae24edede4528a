//! # Pizza Delivery Drone
//!
//! Sizes a drone that must fly a pizza at least 10 km. Endurance grows with
//! battery mass, range is cruise speed times endurance, and the takeoff mass
//! is minimized. The relations are declared on the system itself, so the
//! problem only names the objective.
//!
//! ## Running the Example
//!
//! ```sh
//! cargo run --example pizza_drone
//! ```

use std::error::Error;

use gantry_core::{Quantity, system};
use gantry_solve::{Method, Problem, Solve};
use tracing_subscriber::EnvFilter;

system! {
    #[derive(Debug, Clone)]
    struct PizzaDrone {
        payload: Quantity,
        frame: Quantity,
        battery: Quantity,
        mtow: Quantity,
        cruise_speed: Quantity,
        endurance: Quantity,
        range: Quantity,
    }

    equation mass_eq(s) {
        (s.mtow.clone(), s.payload.try_add(&s.frame)?.try_add(&s.battery)?)
    }

    /// Usable flight time per kilogram of battery.
    equation endurance_eq(s) {
        (s.endurance.clone(), &s.battery * &Quantity::new(40.0, "min/kg")?)
    }

    equation range_eq(s) {
        (s.range.clone(), &s.cruise_speed * &s.endurance)
    }

    greater_than range_min(s) {
        (s.range.clone(), Quantity::new(10.0, "km")?)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gantry_solve=info".parse()?))
        .init();

    let drone = PizzaDrone {
        payload: Quantity::new(0.6, "kg")?.constant(),
        frame: Quantity::new(1.0, "kg")?.at_least(0.5),
        battery: Quantity::new(0.5, "kg")?.between(0.3, 2.0),
        mtow: Quantity::new(3.0, "kg")?.at_least(0.0),
        cruise_speed: Quantity::new(30.0, "km/h")?.constant(),
        endurance: Quantity::new(15.0, "min")?.at_least(0.0),
        range: Quantity::new(5.0, "km")?.at_least(0.0),
    };

    let problem = Problem::minimize(|d: &PizzaDrone| d.mtow.clone());
    let (solved, report) = drone.solve(&problem, &Method::default())?;

    println!("{solved}\n\n{report}");
    Ok(())
}
