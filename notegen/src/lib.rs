//! notegen - programming notes generator
//!
//! Sends a language/topic pair to a notes backend, validates the JSON it
//! answers with, and renders the result as an HTML preview and a Word
//! document.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app_config;
pub mod backend;
pub mod content_model;
pub mod controller;
pub mod docx_exporter;
pub mod html_preview;

pub use content_model::{ContentModel, Section, ValidationError};
pub use controller::{FormController, FormPhase};
