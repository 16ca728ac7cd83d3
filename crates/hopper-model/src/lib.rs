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

//! # Hopper Model
//!
//! Everything the search needs to know about a production planning instance,
//! and everything it hands back.
//!
//! - `record`: the input records supplied by collaborators (`Item`,
//!   `Resource`) with decimal prices, stock and requirements.
//! - `encode`: the Problem Encoder. Filters items, resolves resource
//!   references, converts decimals and produces a dense `Model` or the
//!   zero-result short-circuit.
//! - `model`: the dense encoded problem (`Model`) and its `ModelBuilder`.
//! - `index`: typed item and resource indices.
//! - `solution`: a complete production vector with its revenue.

pub mod encode;
pub mod index;
pub mod model;
pub mod record;
pub mod solution;
