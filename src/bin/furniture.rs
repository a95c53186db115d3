use anyhow::{Result, bail};
use shift_planner::Error;
use shift_planner::config;
use shift_planner::furniture::{self, FurnitureConfig, PartKind};
use shift_planner::logging;

// Problem: chairs and two kinds of tables are assembled from backrests, seats
// and legs. Parts are stripped from broken furniture for free or bought new.
// Each product has a sale price and a minimum demand.
// Goal: maximize sales minus the cost of bought parts.

fn main() -> Result<()> {
    logging::init(logging::level_from_env())?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        bail!("usage: furniture [CONFIG.json]");
    }
    let cfg: FurnitureConfig = config::load_or_default(args.get(1).map(String::as_str))?;

    let assembly = match furniture::build(&cfg)?.solve() {
        Ok(assembly) => assembly,
        Err(Error::Infeasible) => {
            println!("Model cannot be solved.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "* Production model solved with objective: {}",
        assembly.objective()
    );
    for (name, units) in assembly.production() {
        println!("{name} : {units}");
    }
    for kind in PartKind::ALL {
        log::info!(
            "{kind}: {} salvaged of {}, {} bought",
            assembly.salvaged(kind),
            cfg.salvage(kind),
            assembly.bought(kind)
        );
    }

    Ok(())
}
