//! Output formatting: present frequency tables.
//!
//! This module handles the presentation step after generation. It provides:
//!
//! - **FrequencyView**: headers, rows and a totals footer
//! - **TableRow**: a label with formatted values
//!
//! FrequencyView is a pure presentation layer. Counting and sorting happen
//! in the query stage.
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::output::FrequencyView;
//! use wordfreqlib::query::FrequencyTable;
//!
//! let table = FrequencyTable::count_tokens(["a", "b", "a"]);
//! let view = FrequencyView::from_table(&table, None);
//! assert_eq!(view.footer.label, "Total (2 unique)");
//! ```

pub mod table;

pub use table::{FrequencyView, TableRow};
