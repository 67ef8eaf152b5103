//! Zero-copy byte and UTF-8 string views.
//!
//! [`ByteSlice`] and [`CharSlice`] are `Copy` views over borrowed buffers.
//! Search, split, strip and compare never allocate; only operations that
//! produce new text (`add`, `join`, `replacen`, the [`ascii`] transforms)
//! return an owned `Vec<u8>`. The word-at-a-time primitives in [`mem`] and the
//! strict decoder in [`utf8`] are public for callers working on raw buffers.
//!
//! ```
//! use zslice::CharSlice;
//!
//! let line = CharSlice::new("name = Zoë");
//! let (found, key, value) = line.split_once(" = ");
//! assert!(found);
//! assert_eq!(key, "name");
//! assert_eq!(value.char_count(), Ok(3));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod ascii;
pub mod mem;
pub mod utf8;

mod byte_iter;
mod byte_slice;
mod char_iter;
mod char_slice;
mod chars;
mod error;
mod trace;

#[cfg(any(test, feature = "serde"))]
mod serde_impls;

#[cfg(test)]
mod tests;

pub use byte_iter::ByteIter;
pub use byte_slice::{ByteSlice, Split};
pub use char_iter::{Chars, UncheckedChars};
pub use char_slice::{CharSlice, CharSplit};
pub use chars::Char;
pub use error::{Result, SliceError};
