//! Building blocks of the `unpage` binary: inspection views and payload sinks.

pub mod inspect;
pub mod sink;
