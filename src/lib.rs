// src/lib.rs

//! Orientation directory library
//!
//! Static directory of Malian universities (private institutions, public
//! universities grouped by baccalauréat series, and the series themselves),
//! plus the small serverless backend behind the app.

pub mod config;
pub mod directory;
pub mod error;
pub mod lambda;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
