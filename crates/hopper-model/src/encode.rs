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

//! Problem Encoder.
//!
//! Turns the decimal `Item`/`Resource` records into a dense `f64` `Model`.
//!
//! Steps:
//! 1. Reject negative stock.
//! 2. Keep only items with at least one strictly positive requirement.
//!    Items without one contribute nothing measurable and would otherwise
//!    be an unbounded-profit degenerate case.
//! 3. If no item or no resource is left, return `Encoding::Empty`: the
//!    caller reports a zero-revenue plan without searching.
//! 4. Resolve requirement references against the resource list. References
//!    to unknown resources are skipped under
//!    `UnresolvedRequirementPolicy::Ignore` and rejected under `Reject`.
//! 5. Build the model; `ModelBuilder::build` derives per-item caps.
//!
//! The surviving items keep their input order, which is also the column
//! order of the model and the branching order of the search.

use crate::{
    index::{ItemIndex, ResourceIndex},
    model::{Model, ModelBuilder},
    record::{Item, ItemId, Resource, ResourceId},
};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// How requirements that reference an unknown resource are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedRequirementPolicy {
    /// Drop the requirement and keep encoding.
    #[default]
    Ignore,
    /// Fail with `EncodeError::UnresolvedResource`.
    Reject,
}

impl std::fmt::Display for UnresolvedRequirementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// The error type of the encoding step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("{item} has non-positive price {price}")]
    NonPositivePrice { item: ItemId, price: Decimal },
    #[error("{resource} has negative stock {stock}")]
    NegativeStock { resource: ResourceId, stock: Decimal },
    #[error("{item} requires negative quantity {quantity} of {resource}")]
    NegativeRequirement {
        item: ItemId,
        resource: ResourceId,
        quantity: Decimal,
    },
    #[error("{item} references unknown {resource}")]
    UnresolvedResource { item: ItemId, resource: ResourceId },
    #[error("{context} value {value} is not representable as a 64-bit float")]
    NumericConversion { context: &'static str, value: Decimal },
}

/// The encoded instance together with the items it was built from.
///
/// `items()[i]` is the record behind column `i` of `model()`.
#[derive(Debug, Clone)]
pub struct EncodedProblem<'a> {
    items: Vec<&'a Item>,
    model: Model,
}

impl<'a> EncodedProblem<'a> {
    #[inline]
    pub fn items(&self) -> &[&'a Item] {
        &self.items
    }

    #[inline]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<&'a Item>, Model) {
        (self.items, self.model)
    }
}

/// Outcome of the encoding step.
#[derive(Debug, Clone)]
pub enum Encoding<'a> {
    /// No plannable item or no resource: nothing to search.
    Empty,
    /// A non-empty instance ready for search.
    Encoded(EncodedProblem<'a>),
}

impl Encoding<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Encoding::Empty)
    }
}

#[inline]
fn to_f64(context: &'static str, value: Decimal) -> Result<f64, EncodeError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(EncodeError::NumericConversion { context, value })
}

/// Encodes `items` and `resources` into a dense model.
pub fn encode<'a>(
    items: &'a [Item],
    resources: &[Resource],
    policy: UnresolvedRequirementPolicy,
) -> Result<Encoding<'a>, EncodeError> {
    if let Some(resource) = resources.iter().find(|r| r.stock < Decimal::ZERO) {
        return Err(EncodeError::NegativeStock {
            resource: resource.id,
            stock: resource.stock,
        });
    }

    let items: Vec<&'a Item> = items
        .iter()
        .filter(|item| item.has_positive_requirement())
        .collect();

    if items.is_empty() || resources.is_empty() {
        return Ok(Encoding::Empty);
    }

    // A repeated id resolves to its last occurrence.
    let resource_indices: FxHashMap<ResourceId, ResourceIndex> = resources
        .iter()
        .enumerate()
        .map(|(j, r)| (r.id, ResourceIndex::new(j)))
        .collect();

    let mut builder = ModelBuilder::new(items.len(), resources.len());

    for (j, resource) in resources.iter().enumerate() {
        builder.set_resource_stock(ResourceIndex::new(j), to_f64("stock", resource.stock)?);
    }

    for (i, item) in items.iter().enumerate() {
        let item_index = ItemIndex::new(i);

        if item.price <= Decimal::ZERO {
            return Err(EncodeError::NonPositivePrice {
                item: item.id,
                price: item.price,
            });
        }
        builder.set_item_price(item_index, to_f64("price", item.price)?);

        for (&resource_id, &quantity) in &item.requirements {
            if quantity < Decimal::ZERO {
                return Err(EncodeError::NegativeRequirement {
                    item: item.id,
                    resource: resource_id,
                    quantity,
                });
            }

            let Some(&resource_index) = resource_indices.get(&resource_id) else {
                match policy {
                    UnresolvedRequirementPolicy::Ignore => continue,
                    UnresolvedRequirementPolicy::Reject => {
                        return Err(EncodeError::UnresolvedResource {
                            item: item.id,
                            resource: resource_id,
                        });
                    }
                }
            };

            builder.set_consumption(resource_index, item_index, to_f64("requirement", quantity)?);
        }
    }

    Ok(Encoding::Encoded(EncodedProblem {
        items,
        model: builder.build(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    fn flour(stock: i64) -> Resource {
        Resource::new(1, "Flour", d(stock, 0), "g")
    }

    fn encoded<'a>(encoding: Encoding<'a>) -> EncodedProblem<'a> {
        match encoding {
            Encoding::Encoded(problem) => problem,
            Encoding::Empty => panic!("expected an encoded problem"),
        }
    }

    #[test]
    fn test_empty_item_list_short_circuits() {
        let resources = vec![flour(500)];
        let encoding = encode(&[], &resources, UnresolvedRequirementPolicy::Ignore).unwrap();
        assert!(encoding.is_empty());
    }

    #[test]
    fn test_empty_resource_list_short_circuits() {
        let items = vec![Item::new(1, "Bread", "BR", d(45, 0)).with_requirement(1, d(100, 0))];
        let encoding = encode(&items, &[], UnresolvedRequirementPolicy::Ignore).unwrap();
        assert!(encoding.is_empty());
    }

    #[test]
    fn test_items_without_requirements_are_filtered() {
        let items = vec![
            Item::new(1, "Voucher", "V", d(1000, 0)),
            Item::new(2, "Bread", "BR", d(45, 0)).with_requirement(1, d(100, 0)),
            Item::new(3, "Air", "A", d(5, 0)).with_requirement(1, Decimal::ZERO),
        ];
        let resources = vec![flour(500)];

        let problem =
            encoded(encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap());
        assert_eq!(problem.items().len(), 1);
        assert_eq!(problem.items()[0].id, ItemId(2));
        assert_eq!(problem.model().num_items(), 1);
        assert_eq!(problem.model().item_cap(ItemIndex::new(0)), 5);
        assert_eq!(problem.model().item_price(ItemIndex::new(0)), 45.0);
    }

    #[test]
    fn test_tolerance_sized_requirements_are_filtered() {
        let items = vec![
            Item::new(1, "Dust", "DU", d(80, 0)).with_requirement(1, Decimal::new(1, 10)),
            Item::new(2, "Bread", "BR", d(45, 0)).with_requirement(1, d(100, 0)),
        ];
        let resources = vec![flour(500)];

        let problem =
            encoded(encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap());
        assert_eq!(problem.items().len(), 1);
        assert_eq!(problem.items()[0].id, ItemId(2));
        assert_eq!(problem.model().item_cap(ItemIndex::new(0)), 5);
    }

    #[test]
    fn test_only_requirement_free_items_short_circuit() {
        let items = vec![Item::new(1, "Voucher", "V", d(10, 0))];
        let resources = vec![flour(500)];
        let encoding = encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap();
        assert!(encoding.is_empty());
    }

    #[test]
    fn test_unknown_resource_is_ignored_by_default() {
        let items = vec![
            Item::new(1, "Cake", "CK", d(30, 0))
                .with_requirement(1, d(100, 0))
                .with_requirement(99, d(1, 0)),
        ];
        let resources = vec![flour(500)];

        let problem =
            encoded(encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap());
        let model = problem.model();
        assert_eq!(model.item_consumers(ItemIndex::new(0)).len(), 1);
        assert_eq!(model.item_cap(ItemIndex::new(0)), 5);
    }

    #[test]
    fn test_item_with_only_unknown_resources_is_kept_with_zero_cap() {
        let items = vec![Item::new(1, "Ghost", "GH", d(30, 0)).with_requirement(42, d(1, 0))];
        let resources = vec![flour(500)];

        let problem =
            encoded(encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap());
        assert_eq!(problem.items().len(), 1);
        assert_eq!(problem.model().item_cap(ItemIndex::new(0)), 0);
    }

    #[test]
    fn test_unknown_resource_is_rejected_when_configured() {
        let items = vec![Item::new(5, "Cake", "CK", d(30, 0)).with_requirement(99, d(1, 0))];
        let resources = vec![flour(500)];

        let err = encode(&items, &resources, UnresolvedRequirementPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnresolvedResource {
                item: ItemId(5),
                resource: ResourceId(99)
            }
        );
        assert_eq!(err.to_string(), "item#5 references unknown resource#99");
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let resources = vec![Resource::new(3, "Oil", d(-1, 0), "l")];
        let err = encode(&[], &resources, UnresolvedRequirementPolicy::Ignore).unwrap_err();
        assert!(matches!(err, EncodeError::NegativeStock { .. }));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let items = vec![Item::new(2, "Free", "F", Decimal::ZERO).with_requirement(1, d(1, 0))];
        let resources = vec![flour(10)];
        let err = encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap_err();
        assert_eq!(
            err,
            EncodeError::NonPositivePrice {
                item: ItemId(2),
                price: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_negative_requirement_is_rejected() {
        let items = vec![
            Item::new(2, "Odd", "O", d(3, 0))
                .with_requirement(1, d(1, 0))
                .with_requirement(2, d(-1, 0)),
        ];
        let resources = vec![flour(10), Resource::new(2, "Salt", d(10, 0), "g")];
        let err = encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap_err();
        assert!(matches!(err, EncodeError::NegativeRequirement { .. }));
    }

    #[test]
    fn test_decimal_values_are_converted() {
        let items = vec![Item::new(1, "Roll", "R", d(1250, 2)).with_requirement(1, d(125, 1))];
        let resources = vec![Resource::new(1, "Flour", d(1005, 1), "g")];

        let problem =
            encoded(encode(&items, &resources, UnresolvedRequirementPolicy::Ignore).unwrap());
        let model = problem.model();
        assert_eq!(model.item_price(ItemIndex::new(0)), 12.5);
        assert_eq!(model.resource_stock(ResourceIndex::new(0)), 100.5);
        assert_eq!(model.consumption(ResourceIndex::new(0), ItemIndex::new(0)), 12.5);
        assert_eq!(model.item_cap(ItemIndex::new(0)), 8);
    }
}
