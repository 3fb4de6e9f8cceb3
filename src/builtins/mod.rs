//! Built-in converters.
//!
//! - [`timestamp`]: exact-type converter for `chrono::DateTime<Utc>`
//! - [`duration`]: exact-type converter for `std::time::Duration`
//! - [`text_decoder`]: capability converter for types with a
//!   [`TextDecoder`](instruct_core::TextDecoder)
//!
//! [`ResolverBuilder::with_defaults`](crate::ResolverBuilder::with_defaults)
//! installs all three.

mod duration;
mod text;
mod time;

pub use duration::{duration, parse_duration};
pub use text::text_decoder;
pub use time::{TimeLayout, timestamp};
