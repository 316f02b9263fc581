//! Adapters from upstream API shapes into CLI-facing models, and the
//! per-date ranking over them.

pub(crate) mod spending;
