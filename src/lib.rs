//! Non-owning views over contiguous memory interpreted as multidimensional
//! arrays.
//!
//! A [`Shape`] describes an index space: either a single scalar extent, or
//! an ordered tuple of nested shapes, so `(2, 3)` and `((2, 2), 3)` are both
//! shapes. Indices reuse the shape representation: an index into a shape is
//! a value with the same nesting structure whose leaves are coordinates.
//! [`View`] and [`ViewMut`] pair a shape with borrowed storage and translate
//! indices to row-major flat offsets; they never own, allocate, or free the
//! memory they look at.
//!
//! ## A quick guide
//! - Build a [`Shape`] with the [`shape!`] macro, the `From` conversions, or
//!   the enum constructors directly.
//! - Wrap a slice with [`View::new`] or [`ViewMut::new`]; both fault unless
//!   the buffer length matches the shape's size exactly. The `unsafe`
//!   `from_raw_parts` constructors store a raw pointer verbatim instead.
//! - Index with any `Into<Shape>` value, or use the fallible
//!   [`View::get`]/[`ViewMut::get_mut`]. The `unsafe` unchecked lookups skip
//!   validation entirely and keep the zero-cost contract.
//! - Iterate with [`View::iter`]/[`ViewMut::iter_mut`]: every element is
//!   visited exactly once, last axis fastest, matching the indexing offsets.
//!
//! ## What can you do with it?
//! ```
//! use ndview::{shape, ViewMut};
//!
//! let mut buffer = vec![10, 20, 30, 40, 50, 60];
//! let mut view = ViewMut::new(&mut buffer, shape!((2, 3)))?;
//!
//! assert_eq!(view.size(), 6);
//! assert_eq!(view[(0usize, 0usize)], 10);
//! assert_eq!(view[(1usize, 2usize)], 60);
//!
//! view[(1usize, 0usize)] = 44;
//! assert_eq!(
//!     view.iter().copied().collect::<Vec<_>>(),
//!     vec![10, 20, 30, 44, 50, 60],
//! );
//! # Ok::<(), ndview::Error>(())
//! ```

mod error;
mod shape;
mod view;

pub use error::{Context, Error, Result};
pub use shape::{Indices, Shape};
pub use view::{View, ViewMut};
