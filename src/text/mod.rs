//! Text metrics, wrapping and style formatting.

pub mod measure;
pub mod style;
pub mod wrap;

pub use measure::{display_width, strip_markup, truncate_to_width, width_aware_len};
pub use style::{colored, colored_range, recolored, sized, StyleSheet};
pub use wrap::wrap;
