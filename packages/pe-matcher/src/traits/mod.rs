//! Core trait abstractions for the matcher library.
//!
//! These traits are the seams where applications (and tests) plug in the
//! network: one for fetching pages, one for language model calls.

pub mod ai;
pub mod fetcher;
