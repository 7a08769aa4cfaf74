//! Rule pack tests
//!
//! One file per built-in pack, each exporting small HTML bodies with the default pack order.

mod annotations;
mod breaks;
mod columns;
mod commonmark;
mod footnotes;
mod shortcodes;
mod typography;
