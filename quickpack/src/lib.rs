//! QuickPack library
//!
//! Command line front end over `source-deps`: locates the game a map belongs
//! to, resolves the map's custom content and hands it to bspzip.

pub mod cli;
pub mod commands;
pub mod project;
pub mod utils;
