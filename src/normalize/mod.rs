//! Pure normalization functions
//!
//! Turn the loosely formatted strings found in markup into canonical values.
//! None of these functions fail: unparseable input maps to None or a
//! documented default.

mod counts;
mod dates;
mod license;
mod owner;

pub use counts::{first_number, normalize_reputation, parse_count, parse_score};
pub use dates::{parse_date, parse_relative};
pub use license::canonical_license;
pub use owner::{classify_owner, OwnerSignals};
