//! # chatdesk
//!
//! Session & chat controller for the rates page: login modal, "ask AI" form,
//! and the context-usage meter.
//!
//! The controller never touches widgets directly. Hosts hand it a
//! [`ui::Surface`] (named slots with read/write capabilities) and a
//! [`net::Backend`] (the `/login`, `/ask-ai`, `/clear-context`,
//! `/context-info` contract). The bundled binary is a terminal host built on
//! the same pieces.

pub mod commands;
pub mod config;
pub mod controller;
pub mod net;
pub mod state;
pub mod ui;
