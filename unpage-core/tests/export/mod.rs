//! Export pipeline tests
//!
//! Whole-document and page-range scenarios over paged fixtures, rule precedence, and
//! properties of cleanup and fragment reconstruction.

mod properties;
mod range;
mod rules;
mod scenarios;
