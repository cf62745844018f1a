//! Hash collections shared by the gesture crates.
//!
//! Keys are gesture types, optimizations and pointer ids, so the Fx hasher
//! is used unless the `std-hash` feature asks for the standard SipHash
//! tables. Construct with `::default()` so both variants compile.

pub mod map {
    #[cfg(not(feature = "std-hash"))]
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

    #[cfg(feature = "std-hash")]
    pub use std::collections::{HashMap, HashSet};
}
