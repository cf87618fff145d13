// ABOUTME: Library crate for Luyona exposing the wizard engine, flows and TUI for testing

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod flows;
pub mod scheduler;
pub mod screens;
pub mod services;
pub mod wizard;
