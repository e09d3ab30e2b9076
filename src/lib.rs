//! Terminal dashboard for browsing humanitarian organizations on a world map
//! colored by development index.

pub mod app;
pub mod braille;
pub mod catalog;
pub mod config;
pub mod data;
pub mod hdi;
pub mod map;
pub mod session;
pub mod ui;
