//! Formatter value types and the immutable format sets built from them.

pub mod error;
pub mod format;
pub mod format_set;
pub mod formatted;
pub mod formatter;
pub mod locale;
pub mod named;
pub mod relative;

pub use error::FormatError;
pub use format::Format;
pub use format_set::{FormatSet, default_formatters};
pub use formatted::FormattedDate;
pub use formatter::Formatter;
pub use locale::Locale;
pub use named::NamedFormatter;
