//! ThousandEyes HTTP server test automation: API client, result analysis,
//! and report generation

pub mod analyzer;
pub mod api_client;
pub mod report;
