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

use hopper_model::encode::EncodeError;

/// The error type of `optimize`.
///
/// Degenerate inputs (no items, no resources, zero stock) are not errors;
/// they produce a zero-revenue report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("decimal overflow while computing {context}")]
    DecimalOverflow { context: String },
    #[error("{context} value {value} is not representable as a decimal")]
    NumericConversion { context: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopper_model::record::{ItemId, ResourceId};

    #[test]
    fn test_encode_errors_convert_and_display_transparently() {
        let err: OptimizeError = EncodeError::UnresolvedResource {
            item: ItemId(3),
            resource: ResourceId(9),
        }
        .into();
        assert_eq!(err.to_string(), "item#3 references unknown resource#9");
    }

    #[test]
    fn test_display() {
        let err = OptimizeError::DecimalOverflow {
            context: "subtotal of item#1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "decimal overflow while computing subtotal of item#1"
        );
    }
}
