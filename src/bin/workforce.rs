use anyhow::{Result, bail};
use shift_planner::Error;
use shift_planner::config;
use shift_planner::export::SolutionRecord;
use shift_planner::logging;
use shift_planner::workforce::{self, WorkforceConfig};

// Usage: workforce [CONFIG.json] [--out solution.json] [--no-export]
//
// Allocates a fixed number of employees to tasks over several days so that
// every daily production target is met at the lowest wage bill. Employees
// switching task on a given day are rated with the configured switch factor.

#[derive(Debug)]
struct Args {
    config: Option<String>,
    out: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        config: None,
        out: Some("solution.json".to_string()),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out" => match iter.next() {
                Some(path) => parsed.out = Some(path.clone()),
                None => bail!("--out needs a file name"),
            },
            "--no-export" => parsed.out = None,
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            path => {
                if parsed.config.is_some() {
                    bail!("more than one config file given");
                }
                parsed.config = Some(path.to_string());
            }
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    logging::init(logging::level_from_env())?;

    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args[1..])?;
    let cfg: WorkforceConfig = config::load_or_default(args.config.as_deref())?;

    let model = workforce::build(&cfg)?;
    let staffing = match model.solve() {
        Ok(staffing) => staffing,
        Err(Error::Infeasible) => {
            println!("Model cannot be solved.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(out) = &args.out {
        SolutionRecord::from(staffing.plan()).save(out)?;
    }

    println!(
        "* Workforce model solved with objective: {}",
        staffing.objective()
    );
    for (day, counts) in staffing.per_day().iter().enumerate() {
        println!("Day {}", day + 1);
        println!("{}", "-".repeat(15));
        for (task, employees) in counts {
            println!("{task}: {employees:.3}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_export_to_solution_json() {
        let parsed = parse_args(&[]).unwrap();
        assert_eq!(parsed.config, None);
        assert_eq!(parsed.out.as_deref(), Some("solution.json"));
    }

    #[test]
    fn reads_config_and_output_options() {
        let parsed = parse_args(&args(&["plan.json", "--out", "x.json"])).unwrap();
        assert_eq!(parsed.config.as_deref(), Some("plan.json"));
        assert_eq!(parsed.out.as_deref(), Some("x.json"));

        let parsed = parse_args(&args(&["--no-export"])).unwrap();
        assert_eq!(parsed.out, None);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&["--out"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
    }
}
