//! Airport operations server.
//!
//! Models an airport's terminals and the shuttles between them, answers
//! route queries over that network, and keeps the landing queue, the
//! arrivals board and the passenger security table.

pub mod airport;
pub mod board;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod security;
pub mod web;
