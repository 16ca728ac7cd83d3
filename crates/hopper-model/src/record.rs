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

//! Input records handed to the planner by its collaborators.
//!
//! These are read-only snapshots: the planner never mutates them and keeps
//! no reference to them beyond a single `optimize` call. Field names follow
//! the camelCase JSON contract of the surrounding service.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Requirements at or below this quantity count as absent. Equals
/// `hopper_core::num::EPSILON`, the threshold the model applies to
/// consumption entries.
const REQUIREMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// Identifier of a product.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a raw material.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource#{}", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A product that can be manufactured and sold.
///
/// `requirements` maps a resource to the quantity of it consumed by one
/// unit of this item. An item without any positive requirement is never
/// planned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub code: String,
    pub price: Decimal,
    #[serde(default)]
    pub requirements: FxHashMap<ResourceId, Decimal>,
}

impl Item {
    /// Creates an item without requirements.
    pub fn new<N, C>(id: impl Into<ItemId>, name: N, code: C, price: Decimal) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            price,
            requirements: FxHashMap::default(),
        }
    }

    /// Adds (or replaces) the per-unit requirement of `resource`.
    #[inline]
    pub fn with_requirement(mut self, resource: impl Into<ResourceId>, quantity: Decimal) -> Self {
        self.requirements.insert(resource.into(), quantity);
        self
    }

    /// Returns `true` if at least one requirement exceeds the consumption
    /// tolerance of the model.
    #[inline]
    pub fn has_positive_requirement(&self) -> bool {
        self.requirements.values().any(|q| *q > REQUIREMENT_TOLERANCE)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item({}, code: {}, price: {}, requirements: {})",
            self.id,
            self.code,
            self.price,
            self.requirements.len()
        )
    }
}

/// A raw material with a finite stock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub stock: Decimal,
    pub unit: String,
}

impl Resource {
    pub fn new<N, U>(id: impl Into<ResourceId>, name: N, stock: Decimal, unit: U) -> Self
    where
        N: Into<String>,
        U: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            stock,
            unit: unit.into(),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resource({}, stock: {} {})", self.id, self.stock, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_requirement_detection() {
        let empty = Item::new(1, "Bare", "B-1", Decimal::new(10, 0));
        assert!(!empty.has_positive_requirement());

        let zero_only = empty.clone().with_requirement(3, Decimal::ZERO);
        assert!(!zero_only.has_positive_requirement());

        let tiny = zero_only.clone().with_requirement(5, Decimal::new(1, 10));
        assert!(!tiny.has_positive_requirement());

        let at_tolerance = zero_only.clone().with_requirement(5, Decimal::new(1, 9));
        assert!(!at_tolerance.has_positive_requirement());

        let small = zero_only.clone().with_requirement(5, Decimal::new(2, 9));
        assert!(small.has_positive_requirement());

        let used = zero_only.with_requirement(4, Decimal::new(25, 1));
        assert!(used.has_positive_requirement());
    }

    #[test]
    fn test_item_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": 7,
            "name": "Chair",
            "code": "CH-01",
            "price": "45.00",
            "requirements": { "2": "100", "5": 0.5 }
        }"#;

        let item: Item = serde_json::from_str(json).expect("valid item json");
        assert_eq!(item.id, ItemId(7));
        assert_eq!(item.price, Decimal::new(4500, 2));
        assert_eq!(item.requirements[&ResourceId(2)], Decimal::new(100, 0));
        assert_eq!(item.requirements[&ResourceId(5)], Decimal::new(5, 1));
    }

    #[test]
    fn test_item_without_requirements_field_defaults_to_empty() {
        let json = r#"{ "id": 1, "name": "Gift card", "code": "GC", "price": "5" }"#;
        let item: Item = serde_json::from_str(json).expect("valid item json");
        assert!(item.requirements.is_empty());
    }

    #[test]
    fn test_resource_round_trips_through_json() {
        let resource = Resource::new(9, "Oak", Decimal::new(5000, 1), "kg");
        let json = serde_json::to_string(&resource).expect("serializable");
        let back: Resource = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, resource);
        assert_eq!(format!("{}", back), "Resource(resource#9, stock: 500.0 kg)");
    }
}
