//! # Drone Mass Budget
//!
//! Finds the lightest takeoff mass for a delivery drone whose frame and
//! battery each have a minimum mass, given a fixed payload.
//!
//! ## Running the Example
//!
//! ```sh
//! cargo run --example drone
//! RUST_LOG=gantry_solve=debug cargo run --example drone
//! ```

use std::error::Error;

use gantry_core::{Operand, Quantity, Relation, system};
use gantry_solve::{Method, Problem, Solve};
use tracing_subscriber::EnvFilter;

system! {
    #[derive(Debug, Clone)]
    struct Drone {
        payload: Quantity,
        frame: Quantity,
        battery: Quantity,
        mtow: Quantity,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gantry_solve=info".parse()?))
        .init();

    let drone = Drone {
        payload: Quantity::new(1.0, "kg")?.constant(),
        frame: Quantity::new(1.0, "kg")?.at_least(0.5),
        battery: Quantity::new(0.5, "kg")?.at_least(0.3),
        mtow: Quantity::new(4.0, "kg")?.at_least(0.0),
    };

    let mass_balance = Relation::equal(
        Operand::func(|d: &Drone| d.mtow.clone()),
        Operand::func(|d: &Drone| {
            d.payload
                .try_add(&d.frame)
                .and_then(|m| m.try_add(&d.battery))
        }),
    )?
    .named("mass_balance");

    let problem = Problem::minimize(|d: &Drone| d.mtow.clone()).subject_to(mass_balance);
    let (solved, report) = drone.solve(&problem, &Method::default())?;

    println!("{solved}\n\n{report}");
    Ok(())
}
