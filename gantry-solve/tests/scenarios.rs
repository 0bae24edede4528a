use approx::assert_relative_eq;
use gantry_core::{Operand, Quantity, Relation, System, render, system, to_vector};
use gantry_solve::{Cobyla, Error, Method, Problem, Slsqp, Solve, Term, solve};

system! {
    #[derive(Debug, Clone)]
    struct Drone {
        payload: Quantity,
        frame: Quantity,
        battery: Quantity,
        mtow: Quantity,
    }
}

fn drone() -> Drone {
    Drone {
        payload: Quantity::new(1.0, "kg").unwrap().constant(),
        frame: Quantity::new(1.0, "kg").unwrap().at_least(0.5),
        battery: Quantity::new(0.5, "kg").unwrap().at_least(0.3),
        mtow: Quantity::new(4.0, "kg").unwrap().at_least(0.0),
    }
}

/// Every built-in backend with default settings.
fn methods() -> [Method; 2] {
    [Slsqp::default().into(), Cobyla::default().into()]
}

fn mass_balance() -> Relation<Drone> {
    Relation::equal(
        Operand::func(|d: &Drone| d.mtow.clone()),
        Operand::func(|d: &Drone| {
            d.payload
                .try_add(&d.frame)
                .and_then(|m| m.try_add(&d.battery))
        }),
    )
    .unwrap()
    .named("mass_balance")
}

#[test]
fn minimizes_takeoff_mass() {
    let problem = Problem::minimize(|d: &Drone| d.mtow.clone()).subject_to(mass_balance());

    for method in methods() {
        let (solved, report) = drone().solve(&problem, &method).unwrap();

        assert!(report.success, "{method}: {report}");
        assert_relative_eq!(solved.mtow.magnitude(), 1.8, epsilon = 1e-5);
        assert_relative_eq!(solved.frame.magnitude(), 0.5, epsilon = 1e-5);
        assert_relative_eq!(solved.battery.magnitude(), 0.3, epsilon = 1e-5);
        assert_relative_eq!(report.objective, 1.8, epsilon = 1e-5);
    }
}

#[test]
fn constants_and_metadata_survive_a_solve() {
    let start = drone();
    let problem = Problem::minimize(|d: &Drone| d.mtow.clone()).subject_to(mass_balance());

    let (solved, _) = start.solve(&problem, &Method::default()).unwrap();

    assert_eq!(solved.payload.magnitude(), 1.0);
    assert!(solved.payload.is_constant());
    assert_eq!(solved.frame.lower(), Some(0.5));
    assert_eq!(solved.mtow.unit().symbol(), "kg");

    // The input is never mutated.
    assert_eq!(to_vector(&start), vec![1.0, 1.0, 0.5, 4.0]);
}

system! {
    #[derive(Debug, Clone)]
    struct Survey {
        range: Quantity,
        altitude: Quantity,
    }
}

#[test]
fn satisfied_inequality_leaves_range_feasible() {
    let survey = Survey {
        range: Quantity::new(12.0, "km").unwrap(),
        altitude: Quantity::new(120.0, "m").unwrap().constant(),
    };
    let problem = Problem::feasibility().subject_to(
        Relation::greater_than(
            Operand::func(|s: &Survey| s.range.clone()),
            Quantity::new(10.0, "km").unwrap(),
        )
        .unwrap(),
    );

    let (solved, report) = survey.solve(&problem, &Cobyla::default()).unwrap();

    assert!(report.success, "{report}");
    assert!(solved.range.magnitude() >= 10.0 - 1e-6);
    assert_eq!(solved.altitude.magnitude(), 120.0);
}

#[test]
fn inequality_limits_are_converted_into_field_units() {
    let survey = Survey {
        range: Quantity::new(4.0, "km").unwrap(),
        altitude: Quantity::new(120.0, "m").unwrap().constant(),
    };
    let problem = Problem::minimize(|s: &Survey| s.range.clone()).subject_to(
        Relation::greater_than(
            Operand::func(|s: &Survey| s.range.clone()),
            Quantity::new(10_000.0, "m").unwrap(),
        )
        .unwrap(),
    );

    let (solved, report) = survey.solve(&problem, &Cobyla::default()).unwrap();

    assert!(report.success, "{report}");
    assert_relative_eq!(solved.range.magnitude(), 10.0, epsilon = 1e-5);
}

system! {
    #[derive(Debug, Clone)]
    struct Chain {
        a: f64,
        b: f64,
        c: Quantity,
    }

    equation b_doubles_a(s) {
        (s.b, 2.0 * s.a)
    }

    equation c_sums(s) {
        (s.c.magnitude(), s.a + s.b)
    }
}

#[test]
fn feasibility_on_a_consistent_system_keeps_the_start() {
    let chain = Chain {
        a: 1.0,
        b: 2.0,
        c: Quantity::new(3.0, "m").unwrap(),
    };
    let problem = Problem::feasibility().subject_to(
        Relation::equal(Operand::func(|s: &Chain| s.a), 1.0).unwrap(),
    );

    let (solved, report) = chain.solve(&problem, &Cobyla::default()).unwrap();

    assert!(report.success, "{report}");
    for (before, after) in to_vector(&chain).iter().zip(to_vector(&solved)) {
        assert_relative_eq!(*before, after, epsilon = 1e-6);
    }
}

system! {
    #[derive(Debug, Clone)]
    struct Lone {
        a: f64,
        scale: Quantity,
    }
}

fn lone() -> Lone {
    Lone {
        a: 2.0,
        scale: Quantity::new(1.0, "m").unwrap().constant(),
    }
}

#[test]
fn satisfied_equation_holds_for_any_method() {
    let problem = Problem::feasibility()
        .subject_to(Relation::equal(Operand::func(|s: &Lone| s.a), 2.0).unwrap());

    let settings = [
        Method::default(),
        Slsqp {
            fd_step: 1e-6,
            max_evals: 200,
            ..Slsqp::default()
        }
        .into(),
        Cobyla::default().into(),
        Cobyla {
            rho_begin: 0.05,
            ..Cobyla::default()
        }
        .into(),
        Cobyla {
            rho_begin: 3.0,
            max_evals: 200,
            ..Cobyla::default()
        }
        .into(),
    ];

    for optimizer in &settings {
        let (solved, report) = lone().solve(&problem, optimizer).unwrap();
        assert!(report.success, "{optimizer}: {report}");
        assert_relative_eq!(solved.a, 2.0, epsilon = 1e-6);
    }
}

#[test]
fn contradictory_constraints_report_failure() {
    let problem = Problem::feasibility()
        .subject_to(Relation::equal(Operand::func(|s: &Lone| s.a), 2.0).unwrap())
        .subject_to(Relation::greater_than(Operand::func(|s: &Lone| s.a), 3.0).unwrap());

    for method in methods() {
        let (solved, report) = lone().solve(&problem, &method).unwrap();

        assert!(!report.success, "{method}: {report}");
        assert_eq!(solved.scale.magnitude(), 1.0);
    }
}

system! {
    #[derive(Debug, Clone)]
    struct PizzaDrone {
        payload: Quantity,
        frame: Quantity,
        battery: Quantity,
        mtow: Quantity,
    }

    equation mass_eq(s) {
        (s.mtow.clone(), s.payload.try_add(&s.frame)?.try_add(&s.battery)?)
    }

    greater_than battery_share(s) {
        (s.battery.clone(), s.mtow.clone() * 0.2)
    }
}

fn pizza_drone() -> PizzaDrone {
    PizzaDrone {
        payload: Quantity::new(1.0, "kg").unwrap().constant(),
        frame: Quantity::new(1.0, "kg").unwrap().at_least(0.5),
        battery: Quantity::new(0.5, "kg").unwrap().at_least(0.3),
        mtow: Quantity::new(4.0, "kg").unwrap().at_least(0.0),
    }
}

#[test]
fn declared_relations_are_enforced() {
    let problem = Problem::minimize(|d: &PizzaDrone| d.mtow.clone());

    let (solved, report) = pizza_drone().solve(&problem, &Cobyla::default()).unwrap();

    // battery >= 0.2 * (1.5 kg + battery) once the frame hits its floor.
    assert!(report.success, "{report}");
    assert_relative_eq!(solved.battery.magnitude(), 0.375, epsilon = 1e-5);
    assert_relative_eq!(solved.mtow.magnitude(), 1.875, epsilon = 1e-5);
    for relation in PizzaDrone::relations() {
        assert!(relation.is_satisfied(&solved, 1e-6).unwrap());
    }
}

#[test]
fn explicit_constraints_add_to_declared_ones() {
    let problem = Problem::minimize(|d: &PizzaDrone| d.mtow.clone()).subject_to(
        Relation::greater_than(
            Operand::func(|d: &PizzaDrone| d.frame.clone()),
            Quantity::new(600.0, "g").unwrap(),
        )
        .unwrap(),
    );

    let (solved, report) = solve(&pizza_drone(), &problem, &Cobyla::default()).unwrap();

    // mtow = 1.6 kg + battery, battery = 0.25 * 1.6 kg.
    assert!(report.success, "{report}");
    assert_relative_eq!(solved.frame.magnitude(), 0.6, epsilon = 1e-5);
    assert_relative_eq!(solved.battery.magnitude(), 0.4, epsilon = 1e-5);
    assert_relative_eq!(solved.mtow.magnitude(), 2.0, epsilon = 1e-5);
}

system! {
    #[derive(Debug, Clone)]
    struct Line {
        x: f64,
        y: f64,
    }
}

#[test]
fn bare_functions_are_minimized_in_least_squares() {
    let problem = Problem::from_terms([
        Term::from(
            Relation::equal(
                Operand::func(|l: &Line| l.y),
                Operand::func(|l: &Line| 2.0 * l.x),
            )
            .unwrap(),
        ),
        Term::residual(|l: &Line| l.x - 3.0),
    ]);

    let (solved, report) = Line { x: 0.0, y: 0.0 }
        .solve(&problem, &Cobyla::default())
        .unwrap();

    assert!(report.success, "{report}");
    assert_relative_eq!(solved.x, 3.0, epsilon = 1e-4);
    assert_relative_eq!(solved.y, 6.0, epsilon = 1e-4);
}

#[test]
fn evaluation_errors_abort_the_solve() {
    let problem = Problem::feasibility().subject_to(
        Relation::equal(
            Operand::func(|d: &Drone| d.mtow.clone()),
            Operand::func(|_: &Drone| Quantity::new(1.0, "s")),
        )
        .unwrap()
        .named("mixed_units"),
    );

    let error = drone().solve(&problem, &Method::default()).unwrap_err();

    match error {
        Error::Evaluation { context, source } => {
            assert_eq!(context, "relation `mixed_units`");
            assert!(matches!(source, gantry_core::Error::Dimensionality(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_settings_are_rejected_before_solving() {
    let optimizer = Cobyla {
        max_evals: 0,
        ..Cobyla::default()
    };

    let error = drone()
        .solve(&Problem::feasibility(), &optimizer)
        .unwrap_err();

    assert!(matches!(error, Error::InvalidConfig { .. }));
}

#[test]
fn fully_pinned_systems_are_checked_without_optimizing() {
    let fixed = Drone {
        payload: Quantity::new(1.0, "kg").unwrap().constant(),
        frame: Quantity::new(0.5, "kg").unwrap().constant(),
        battery: Quantity::new(0.3, "kg").unwrap().constant(),
        mtow: Quantity::new(1.8, "kg").unwrap().constant(),
    };
    let problem = Problem::minimize(|d: &Drone| d.mtow.clone()).subject_to(mass_balance());

    let (solved, report) = fixed.solve(&problem, &Method::default()).unwrap();

    assert!(report.success, "{report}");
    assert_eq!(report.iterations, 0);
    assert_relative_eq!(report.objective, 1.8);
    assert_eq!(render(&solved), render(&fixed));
}

#[test]
fn fully_pinned_violations_are_reported() {
    let fixed = Drone {
        payload: Quantity::new(1.0, "kg").unwrap().constant(),
        frame: Quantity::new(0.5, "kg").unwrap().constant(),
        battery: Quantity::new(0.3, "kg").unwrap().constant(),
        mtow: Quantity::new(3.0, "kg").unwrap().constant(),
    };
    let problem = Problem::feasibility().subject_to(mass_balance());

    let (_, report) = fixed.solve(&problem, &Method::default()).unwrap();

    assert!(!report.success);
    assert!(report.message.contains("1 relation(s) violated"));
}
