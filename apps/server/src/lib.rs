//! # Gazette Server
//!
//! The Actix-web application: JSON API handlers, bearer-auth middleware,
//! multipart post forms, and the server-rendered public site and admin area.

pub mod config;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod state;
pub mod telemetry;
