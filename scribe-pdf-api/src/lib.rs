//! # scribe-pdf-api
//!
//! REST API server for the scribe-pdf layout engine
//!

mod api;
pub use api::{
    app, generate_pdf, health_check, AppError, ErrorResponse, GeneratePdfRequest,
};
