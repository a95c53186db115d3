//! Furniture assembly from salvaged and bought parts.
//!
//! Broken furniture is stripped for backrests, seats and legs. Each product
//! needs a fixed bill of parts, each part either comes from the salvage pool
//! or is bought, and the model maximises sales minus purchases subject to a
//! minimum demand per product.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::program::{Domain, Program, Sense};
use crate::solver::{self, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Backrest,
    Seat,
    Leg,
}

impl PartKind {
    pub const ALL: [PartKind; 3] = [PartKind::Backrest, PartKind::Seat, PartKind::Leg];

    /// One-letter code used in variable and row names.
    pub fn code(self) -> char {
        match self {
            PartKind::Backrest => 'R',
            PartKind::Seat => 'A',
            PartKind::Leg => 'P',
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartKind::Backrest => "backrest",
            PartKind::Seat => "seat",
            PartKind::Leg => "leg",
        };
        f.write_str(name)
    }
}

/// A quantity per part kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parts {
    pub backrest: f64,
    pub seat: f64,
    pub leg: f64,
}

impl Parts {
    pub fn new(backrest: f64, seat: f64, leg: f64) -> Self {
        Parts { backrest, seat, leg }
    }

    pub fn get(&self, kind: PartKind) -> f64 {
        match kind {
            PartKind::Backrest => self.backrest,
            PartKind::Seat => self.seat,
            PartKind::Leg => self.leg,
        }
    }

    fn values(&self) -> [f64; 3] {
        [self.backrest, self.seat, self.leg]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub min_demand: f64,
    /// Parts needed for one unit.
    pub bill: Parts,
}

/// A batch of identically broken items and what each still yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokenLot {
    pub name: String,
    pub count: f64,
    pub yields: Parts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FurnitureConfig {
    pub products: Vec<Product>,
    /// Price of buying one new part.
    pub part_prices: Parts,
    pub broken: Vec<BrokenLot>,
}

impl Default for FurnitureConfig {
    fn default() -> Self {
        let product = |name: &str, price, min_demand, bill| Product {
            name: name.to_string(),
            price,
            min_demand,
            bill,
        };
        let lot = |name: &str, count, yields| BrokenLot {
            name: name.to_string(),
            count,
            yields,
        };
        FurnitureConfig {
            products: vec![
                product("SILLAS", 100.0, 40.0, Parts::new(1.0, 1.0, 4.0)),
                product("TAB4", 40.0, 30.0, Parts::new(0.0, 1.0, 4.0)),
                product("TAB3", 40.0, 30.0, Parts::new(0.0, 1.0, 3.0)),
            ],
            part_prices: Parts::new(80.0, 70.0, 20.0),
            broken: vec![
                // broken backrest
                lot("RR", 30.0, Parts::new(0.0, 1.0, 4.0)),
                // broken seat
                lot("AR", 30.0, Parts::new(1.0, 0.0, 4.0)),
                // one or two broken legs
                lot("P1", 20.0, Parts::new(1.0, 1.0, 3.0)),
                lot("P2", 10.0, Parts::new(1.0, 1.0, 2.0)),
                // broken backrest and one leg
                lot("RR1P", 30.0, Parts::new(0.0, 1.0, 3.0)),
            ],
        }
    }
}

fn check_quantity(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!("{what} must be a non-negative number, got {value}")))
    }
}

impl FurnitureConfig {
    /// Parts of `kind` recoverable from all broken lots.
    pub fn salvage(&self, kind: PartKind) -> f64 {
        self.broken
            .iter()
            .map(|lot| lot.count * lot.yields.get(kind))
            .sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.products.is_empty() {
            return Err(Error::invalid("no products to build"));
        }
        let mut names = HashSet::new();
        for product in &self.products {
            if !names.insert(product.name.as_str()) {
                return Err(Error::invalid(format!("product {} listed twice", product.name)));
            }
            check_quantity(&format!("{} price", product.name), product.price)?;
            check_quantity(&format!("{} demand", product.name), product.min_demand)?;
            for count in product.bill.values() {
                check_quantity(&format!("{} bill", product.name), count)?;
            }
        }
        for price in self.part_prices.values() {
            check_quantity("part price", price)?;
        }
        for lot in &self.broken {
            check_quantity(&format!("{} count", lot.name), lot.count)?;
            for count in lot.yields.values() {
                check_quantity(&format!("{} yield", lot.name), count)?;
            }
        }
        Ok(())
    }
}

/// Decision variables of the assembly program. Products are referred to by
/// their position in [`FurnitureConfig::products`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Make(usize),
    Salvaged(usize, PartKind),
    Bought(usize, PartKind),
}

#[derive(Debug, Clone)]
pub struct FurnitureModel {
    products: Vec<String>,
    program: Program<Item>,
}

pub fn build(config: &FurnitureConfig) -> Result<FurnitureModel> {
    config.validate()?;
    let mut program = Program::new("furniture_reuse", Sense::Maximize);

    for (i, product) in config.products.iter().enumerate() {
        program.add_var(
            Item::Make(i),
            format!("make_{}", product.name),
            Domain::Integer,
            product.price,
        )?;
    }
    for (i, product) in config.products.iter().enumerate() {
        for kind in PartKind::ALL {
            if product.bill.get(kind) == 0.0 {
                continue;
            }
            let code = kind.code();
            program.add_var(
                Item::Salvaged(i, kind),
                format!("used_{code}S{}", i + 1),
                Domain::Integer,
                0.0,
            )?;
            program.add_var(
                Item::Bought(i, kind),
                format!("bought_{code}C{}", i + 1),
                Domain::Integer,
                -config.part_prices.get(kind),
            )?;
        }
    }

    // every part of every unit is either salvaged or bought
    for (i, product) in config.products.iter().enumerate() {
        for kind in PartKind::ALL {
            let count = product.bill.get(kind);
            if count == 0.0 {
                continue;
            }
            program.add_eq(
                format!("bill_{}_{}", product.name, kind.code()),
                [
                    (&Item::Make(i), count),
                    (&Item::Salvaged(i, kind), -1.0),
                    (&Item::Bought(i, kind), -1.0),
                ],
                0.0,
            )?;
        }
    }

    for kind in PartKind::ALL {
        let users: Vec<Item> = config
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.bill.get(kind) > 0.0)
            .map(|(i, _)| Item::Salvaged(i, kind))
            .collect();
        if users.is_empty() {
            continue;
        }
        program.add_le(
            format!("salvage_{}", kind.code()),
            users.iter().map(|item| (item, 1.0)),
            config.salvage(kind),
        )?;
    }

    for (i, product) in config.products.iter().enumerate() {
        program.add_ge(
            format!("demand_{}", product.name),
            [(&Item::Make(i), 1.0)],
            product.min_demand,
        )?;
    }

    Ok(FurnitureModel {
        products: config.products.iter().map(|p| p.name.clone()).collect(),
        program,
    })
}

impl FurnitureModel {
    pub fn program(&self) -> &Program<Item> {
        &self.program
    }

    pub fn solve(self) -> Result<Assembly> {
        let plan = solver::solve(&self.program)?;
        Ok(Assembly {
            products: self.products,
            plan,
        })
    }
}

/// A solved assembly plan.
#[derive(Debug, Clone)]
pub struct Assembly {
    products: Vec<String>,
    plan: Plan<Item>,
}

impl Assembly {
    pub fn plan(&self) -> &Plan<Item> {
        &self.plan
    }

    pub fn objective(&self) -> f64 {
        self.plan.objective()
    }

    /// Units made of each product, in configuration order.
    pub fn production(&self) -> Vec<(&str, f64)> {
        self.products
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), self.plan.value(&Item::Make(i)).unwrap_or(0.0)))
            .collect()
    }

    fn total(&self, pick: impl Fn(usize) -> Item) -> f64 {
        (0..self.products.len())
            .filter_map(|i| self.plan.value(&pick(i)))
            .sum()
    }

    pub fn salvaged(&self, kind: PartKind) -> f64 {
        self.total(|i| Item::Salvaged(i, kind))
    }

    pub fn bought(&self, kind: PartKind) -> f64 {
        self.total(|i| Item::Bought(i, kind))
    }
}
