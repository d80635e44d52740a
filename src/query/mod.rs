//! Query construction module
//!
//! Builds the request URLs sent by the fetch engine.
//!
//! # Overview
//!
//! - Collection pages: `<base>/<type>?limit=N&offset=M<filters><order_by>`
//! - Single id lookups: `<base>/<type>?filters[id]=<id>`
//! - Batched id lookups: `<base>/<type>?limit=N&filters[id][]=<id>...`

mod builder;

pub use builder::{filter_suffix, id_queries, RequestSpec};
