//! Date display utilities.

use std::fmt;

use jiff::civil::Date;

/// A wrapper around a civil `Date` formatted the way the dashboard shows
/// dates.
///
/// # Format
///
/// `DD Mon YYYY`, for example `14 Mar 2025`.
///
/// ```rust
/// use harvis_core::display::DisplayDate;
/// use jiff::civil::date;
///
/// assert_eq!(DisplayDate(&date(2025, 3, 14)).to_string(), "14 Mar 2025");
/// ```
pub struct DisplayDate<'a>(pub &'a Date);

impl fmt::Display for DisplayDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%d %b %Y"))
    }
}
