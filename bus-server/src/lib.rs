//! Bus arrival server.
//!
//! A thin HTTP façade over the uWave real-time bus API that answers:
//! "where is every bus on this line, and when will it reach each stop?"

pub mod arrivals;
pub mod config;
pub mod directory;
pub mod domain;
pub mod network;
pub mod uwave;
pub mod web;
