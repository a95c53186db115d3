//! Models solved end to end with SCIP.

use shift_planner::Error;
use shift_planner::export::SolutionRecord;
use shift_planner::furniture::{self, FurnitureConfig, PartKind};
use shift_planner::program::{Domain, Program, Sense};
use shift_planner::solve;
use shift_planner::workforce::{self, WorkforceConfig};

const EPS: f64 = 1e-6;

#[test]
fn small_production_program() {
    // 2a + b <= 100 hours, a + 2b <= 80 material, profit 40a + 30b
    let mut program = Program::new("production_planning", Sense::Maximize);
    program.add_var("a", "product_A", Domain::Integer, 40.0).unwrap();
    program.add_var("b", "product_B", Domain::Integer, 30.0).unwrap();
    program.add_le("labor", [(&"a", 2.0), (&"b", 1.0)], 100.0).unwrap();
    program.add_le("material", [(&"a", 1.0), (&"b", 2.0)], 80.0).unwrap();

    let plan = solve(&program).unwrap();
    assert!((plan.objective() - 2200.0).abs() < EPS);
    assert!((plan.value(&"a").unwrap() - 40.0).abs() < EPS);
    assert!((plan.value(&"b").unwrap() - 20.0).abs() < EPS);
    let names: Vec<&str> = plan.iter().map(|(_, name, _)| name).collect();
    assert_eq!(names, vec!["product_A", "product_B"]);
}

#[test]
fn contradictory_bounds_are_infeasible() {
    let mut program = Program::new("contradiction", Sense::Minimize);
    program.add_var("x", "x", Domain::Continuous, 1.0).unwrap();
    program.add_ge("at_least", [(&"x", 1.0)], 5.0).unwrap();
    program.add_le("at_most", [(&"x", 1.0)], 3.0).unwrap();
    assert_eq!(solve(&program).unwrap_err(), Error::Infeasible);
}

#[test]
fn furniture_default_scenario() {
    let config = FurnitureConfig::default();
    let assembly = furniture::build(&config).unwrap().solve().unwrap();

    // chairs are worth making while legs last; every extra seat is bought
    assert!((assembly.objective() - 6000.0).abs() < EPS);
    let production = assembly.production();
    assert_eq!(production[0].0, "SILLAS");
    assert!((production[0].1 - 50.0).abs() < EPS);
    assert!((production[1].1 - 30.0).abs() < EPS);
    assert!((production[2].1 - 30.0).abs() < EPS);

    assert!((assembly.bought(PartKind::Seat) - 20.0).abs() < EPS);
    assert!(assembly.bought(PartKind::Leg).abs() < EPS);
    assert!(assembly.bought(PartKind::Backrest).abs() < EPS);
    for kind in PartKind::ALL {
        assert!(assembly.salvaged(kind) <= config.salvage(kind) + EPS);
    }
}

#[test]
fn furniture_unmeetable_demand_buys_parts() {
    let config = FurnitureConfig {
        broken: Vec::new(),
        ..FurnitureConfig::default()
    };
    let assembly = furniture::build(&config).unwrap().solve().unwrap();
    // nothing salvaged: minimum demand only, all parts bought
    let expected = 40.0 * (100.0 - 80.0 - 70.0 - 4.0 * 20.0)
        + 30.0 * (40.0 - 70.0 - 4.0 * 20.0)
        + 30.0 * (40.0 - 70.0 - 3.0 * 20.0);
    assert!((assembly.objective() - expected).abs() < EPS);
    assert!(assembly.salvaged(PartKind::Leg).abs() < EPS);
}

#[test]
fn workforce_default_scenario_meets_every_row() {
    let config = WorkforceConfig::default();
    let model = workforce::build(&config).unwrap();
    let program = model.program().clone();
    let staffing = model.solve().unwrap();

    let values: Vec<f64> = program
        .columns()
        .iter()
        .map(|c| staffing.employees(&c.key).unwrap())
        .collect();
    for row in program.rows() {
        let activity: f64 = row.terms.iter().map(|&(p, c)| c * values[p]).sum();
        assert!(activity >= row.lower - 1e-4, "{} below {}", row.name, row.lower);
        assert!(activity <= row.upper + 1e-4, "{} above {}", row.name, row.upper);
    }

    let per_day = staffing.per_day();
    assert_eq!(per_day.len(), 3);
    for counts in &per_day {
        let tasks: String = counts.iter().map(|(t, _)| t.label()).collect();
        assert_eq!(tasks, "RMON");
        let total: f64 = counts.iter().map(|(_, n)| n).sum();
        assert!((total - 18.0).abs() < 1e-4);
    }

    let paid: f64 = program
        .columns()
        .iter()
        .zip(&values)
        .filter(|(c, _)| c.key.last() != Some(config.idle_task))
        .map(|(_, v)| v)
        .sum();
    assert!((staffing.objective() - 12.0 * paid).abs() < 1e-4);
}

#[test]
fn workforce_without_enough_staff_is_infeasible() {
    let config = WorkforceConfig {
        total_employees: 1.0,
        ..WorkforceConfig::default()
    };
    let result = workforce::build(&config).unwrap().solve();
    assert!(matches!(result, Err(Error::Infeasible)));
}

#[test]
fn solution_record_lists_every_history() {
    let staffing = workforce::build(&WorkforceConfig::default())
        .unwrap()
        .solve()
        .unwrap();
    let record = SolutionRecord::from(staffing.plan());
    assert_eq!(record.problem, "workforce_allocation");
    assert_eq!(record.variables.len(), 84);
    assert!(record.variables.contains_key("x_RMO"));
    assert!((record.objective - staffing.objective()).abs() < EPS);
}
