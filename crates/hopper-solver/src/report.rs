// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Result assembly.
//!
//! Converts a search `Solution` back into the record vocabulary of the
//! caller. Money stays exact: subtotals are `price * quantity` in decimal
//! arithmetic and the total revenue is their sum rounded to cents (half away
//! from zero). Resource usage is derived from the `f64` consumption matrix
//! and rounded to four decimal places.

use crate::error::OptimizeError;
use hopper_model::{
    index::{ItemIndex, ResourceIndex},
    model::Model,
    record::{Item, ItemId, Resource, ResourceId},
    solution::Solution,
};
use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REVENUE_DECIMALS: u32 = 2;
const USAGE_DECIMALS: u32 = 4;

/// One line of the production plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub item_id: ItemId,
    pub name: String,
    pub code: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Consumption of one resource under the plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
    pub resource_id: ResourceId,
    pub name: String,
    pub available: Decimal,
    pub used: Decimal,
    pub remaining: Decimal,
    pub unit: String,
    pub usage_percent: f64,
}

/// The result of one `optimize` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub total_revenue: Decimal,
    pub production_plan: Vec<PlanEntry>,
    pub resource_usage: Vec<ResourceUsage>,
    pub computation_time_ms: u64,
    /// `false` when a node or time limit cut the search short.
    pub proven_optimal: bool,
}

impl OptimizationReport {
    /// Returns the planned quantity of `item`, or `None` if it is not in the plan.
    pub fn quantity_of(&self, item: ItemId) -> Option<u64> {
        self.production_plan
            .iter()
            .find(|entry| entry.item_id == item)
            .map(|entry| entry.quantity)
    }
}

impl std::fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Optimization Report")?;
        writeln!(f, "Total revenue: {}", self.total_revenue)?;
        writeln!(
            f,
            "Computation time: {}ms{}",
            self.computation_time_ms,
            if self.proven_optimal { "" } else { " (truncated)" }
        )?;

        writeln!(f, "{:<24} | {:>10} | {:>14}", "Item", "Quantity", "Subtotal")?;
        for entry in &self.production_plan {
            writeln!(
                f,
                "{:<24} | {:>10} | {:>14}",
                entry.name, entry.quantity, entry.subtotal
            )?;
        }

        writeln!(f, "{:<24} | {:>14} | {:>14} | {:>7}", "Resource", "Used", "Available", "Usage")?;
        for usage in &self.resource_usage {
            writeln!(
                f,
                "{:<24} | {:>14} | {:>14} | {:>6.1}%",
                usage.name, usage.used, usage.available, usage.usage_percent
            )?;
        }
        Ok(())
    }
}

#[inline]
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Builds the zero-revenue report: an empty plan and every resource untouched.
pub fn empty_report(resources: &[Resource], elapsed: Duration) -> OptimizationReport {
    let resource_usage = resources
        .iter()
        .map(|resource| ResourceUsage {
            resource_id: resource.id,
            name: resource.name.clone(),
            available: resource.stock,
            used: Decimal::ZERO,
            remaining: resource.stock,
            unit: resource.unit.clone(),
            usage_percent: 0.0,
        })
        .collect();

    OptimizationReport {
        total_revenue: Decimal::ZERO,
        production_plan: Vec::new(),
        resource_usage,
        computation_time_ms: millis(elapsed),
        proven_optimal: true,
    }
}

/// Assembles the report for `solution`.
///
/// `items[i]` must be the record behind column `i` of `model`, and
/// `resources[j]` the record behind row `j`.
pub fn assemble(
    items: &[&Item],
    resources: &[Resource],
    model: &Model,
    solution: &Solution,
    proven_optimal: bool,
    elapsed: Duration,
) -> Result<OptimizationReport, OptimizeError> {
    debug_assert_eq!(
        items.len(),
        model.num_items(),
        "called `assemble` with {} items for a model of {} items",
        items.len(),
        model.num_items()
    );
    debug_assert_eq!(
        resources.len(),
        model.num_resources(),
        "called `assemble` with {} resources for a model of {} resources",
        resources.len(),
        model.num_resources()
    );

    let mut total = Decimal::ZERO;
    let mut production_plan = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let quantity = solution.quantity(ItemIndex::new(i));
        let subtotal = item
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| OptimizeError::DecimalOverflow {
                context: format!("subtotal of {}", item.id),
            })?;
        total = total
            .checked_add(subtotal)
            .ok_or_else(|| OptimizeError::DecimalOverflow {
                context: "total revenue".to_string(),
            })?;

        production_plan.push(PlanEntry {
            item_id: item.id,
            name: item.name.clone(),
            code: item.code.clone(),
            quantity,
            unit_price: item.price,
            subtotal,
        });
    }

    let mut used = vec![0.0; model.num_resources()];
    model.committed_usage(solution.quantities(), &mut used);

    let mut resource_usage = Vec::with_capacity(resources.len());
    for (j, resource) in resources.iter().enumerate() {
        let used_units = used[j];
        let used_decimal = Decimal::from_f64(used_units)
            .ok_or(OptimizeError::NumericConversion {
                context: "resource usage",
                value: used_units,
            })?
            .round_dp_with_strategy(USAGE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        let remaining = resource.stock.checked_sub(used_decimal).ok_or_else(|| {
            OptimizeError::DecimalOverflow {
                context: format!("remaining stock of {}", resource.id),
            }
        })?;

        let stock = model.resource_stock(ResourceIndex::new(j));
        let usage_percent = if stock > 0.0 {
            used_units / stock * 100.0
        } else {
            0.0
        };

        resource_usage.push(ResourceUsage {
            resource_id: resource.id,
            name: resource.name.clone(),
            available: resource.stock,
            used: used_decimal,
            remaining,
            unit: resource.unit.clone(),
            usage_percent,
        });
    }

    Ok(OptimizationReport {
        total_revenue: total
            .round_dp_with_strategy(REVENUE_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        production_plan,
        resource_usage,
        computation_time_ms: millis(elapsed),
        proven_optimal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopper_model::encode::{Encoding, UnresolvedRequirementPolicy, encode};

    fn d(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    fn assemble_for(
        items: &[Item],
        resources: &[Resource],
        quantities: Vec<u64>,
    ) -> OptimizationReport {
        let problem = match encode(items, resources, UnresolvedRequirementPolicy::Ignore).unwrap() {
            Encoding::Encoded(problem) => problem,
            Encoding::Empty => panic!("expected an encoded problem"),
        };
        let revenue = problem.model().revenue_of(&quantities);
        let solution = Solution::new(revenue, quantities);
        assemble(
            problem.items(),
            resources,
            problem.model(),
            &solution,
            true,
            Duration::from_millis(7),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_report_lists_untouched_resources() {
        let resources = vec![
            Resource::new(1, "Flour", d(500, 0), "g"),
            Resource::new(2, "Salt", Decimal::ZERO, "g"),
        ];
        let report = empty_report(&resources, Duration::from_millis(3));

        assert_eq!(report.total_revenue, Decimal::ZERO);
        assert!(report.production_plan.is_empty());
        assert_eq!(report.resource_usage.len(), 2);
        assert_eq!(report.resource_usage[0].remaining, d(500, 0));
        assert_eq!(report.resource_usage[1].used, Decimal::ZERO);
        assert_eq!(report.resource_usage[1].usage_percent, 0.0);
        assert_eq!(report.computation_time_ms, 3);
        assert!(report.proven_optimal);
    }

    #[test]
    fn test_subtotals_are_exact_and_revenue_rounds_half_away_from_zero() {
        let resources = vec![Resource::new(1, "Cocoa", d(3, 0), "kg")];
        let items =
            vec![Item::new(1, "Praline", "PR", d(125, 3)).with_requirement(1, d(1, 0))];
        let report = assemble_for(&items, &resources, vec![3]);

        assert_eq!(report.production_plan[0].subtotal, d(375, 3));
        assert_eq!(report.total_revenue, d(38, 2));
        assert_eq!(report.computation_time_ms, 7);
    }

    #[test]
    fn test_usage_is_rounded_to_four_places() {
        let resources = vec![Resource::new(1, "Milk", d(1, 0), "l")];
        let items = vec![Item::new(1, "Shot", "SH", d(2, 0)).with_requirement(1, d(1, 1))];
        let report = assemble_for(&items, &resources, vec![3]);

        let usage = &report.resource_usage[0];
        assert_eq!(usage.used, d(3, 1));
        assert_eq!(usage.remaining, d(7, 1));
        assert!((usage.usage_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_quantities_stay_in_the_plan() {
        let resources = vec![Resource::new(1, "Flour", d(500, 0), "g")];
        let items = vec![
            Item::new(1, "Bread", "BR", d(50, 0)).with_requirement(1, d(200, 0)),
            Item::new(2, "Roll", "RL", d(30, 0)).with_requirement(1, d(100, 0)),
        ];
        let report = assemble_for(&items, &resources, vec![0, 5]);

        assert_eq!(report.production_plan.len(), 2);
        assert_eq!(report.quantity_of(ItemId(1)), Some(0));
        assert_eq!(report.quantity_of(ItemId(2)), Some(5));
        assert_eq!(report.production_plan[0].subtotal, Decimal::ZERO);
        assert_eq!(report.total_revenue, d(150, 0));
        assert_eq!(report.resource_usage[0].remaining, Decimal::ZERO);
        assert!((report.resource_usage[0].usage_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_subtotal_is_an_error() {
        let resources = vec![Resource::new(1, "Gold", d(1_000_000, 0), "g")];
        let items = vec![Item::new(1, "Bar", "AU", Decimal::MAX).with_requirement(1, d(1, 0))];
        let problem = match encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap()
        {
            Encoding::Encoded(problem) => problem,
            Encoding::Empty => panic!("expected an encoded problem"),
        };
        let solution = Solution::new(0.0, vec![2]);
        let err = assemble(
            problem.items(),
            &resources,
            problem.model(),
            &solution,
            true,
            Duration::ZERO,
        )
        .unwrap_err();

        assert!(matches!(err, OptimizeError::DecimalOverflow { .. }));
    }

    #[test]
    fn test_display_marks_truncated_reports() {
        let resources = vec![Resource::new(1, "Flour", d(500, 0), "g")];
        let mut report = empty_report(&resources, Duration::ZERO);
        assert!(!format!("{}", report).contains("(truncated)"));

        report.proven_optimal = false;
        let rendered = format!("{}", report);
        assert!(rendered.starts_with("Optimization Report"));
        assert!(rendered.contains("(truncated)"));
        assert!(rendered.contains("Flour"));
    }
}
