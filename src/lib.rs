//! Turn the ipsw.me firmware release feed into structured records.
//!
//! The pipeline is a straight line: [`feed`] downloads and deserializes the
//! RSS document, [`release`] runs each raw item through the [`normalize`]
//! heuristics, [`select`] filters and orders the results, and [`render`]
//! lays them out as a fixed-width table. Everything between fetch and print
//! is a pure function over strings, which is also where all the interesting
//! behavior lives.

pub mod data;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod pubdate;
pub mod release;
pub mod render;
pub mod select;
