//! Shopping list aggregation and PDF report rendering.
//!
//! This crate is the data-transformation core of mealshare: it folds the
//! ingredient lines of the recipes a user has put in their cart into one
//! line per distinct ingredient, then renders the result as a paginated
//! text report in PDF form. It has no web or database dependencies; the
//! server crate feeds it rows and attaches the returned bytes to an HTTP
//! response.

pub mod aggregation;
pub mod codepage;
pub mod pdf;

pub use aggregation::{aggregate, format_amount, AggregatedLine, CartLine};
pub use pdf::{render_report, PdfError};
