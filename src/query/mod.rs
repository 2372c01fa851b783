//! Client-side query layer.
//!
//! Collection reads are cached per query key; any successful mutation
//! invalidates the whole collection namespace, so the next read goes back
//! to the backend.

pub mod books;

pub use books::BookQueryService;
