//! Formats the most recent test result into a fixed-width summary block.
//!
//! Test name and target come from the run configuration, not from the
//! result entry: display identity follows the request context while
//! measurement values follow the response. Absent measurements render as
//! an explicit marker so the layout never shifts.

use te_monitor_common::{Config, ResultEntry, TestResults};

const MISSING: &str = "n/a";
const NO_RESULTS_LINE: &str = "[!] No HTTP server test results available.\n";

/// Print a summary of the most recent result entry to stdout, or a single
/// "no results" notice when the payload is empty
pub fn analyze(config: &Config, results: &TestResults) {
    print!("{}", summarize(config, results));
}

/// Render the summary without printing it
pub fn summarize(config: &Config, results: &TestResults) -> String {
    match results.latest() {
        Some(entry) => render_entry(config, entry),
        None => NO_RESULTS_LINE.to_string(),
    }
}

fn render_entry(config: &Config, entry: &ResultEntry) -> String {
    let mut out = String::new();

    out.push_str("\n========== HTTP SERVER TEST RESULTS ==========\n");
    out.push_str(&line("Test Name", &config.test_name));
    out.push_str(&line("Agent", &fmt_agent(entry)));
    out.push_str(&line("Test Date", entry.date.as_deref().unwrap_or(MISSING)));
    out.push_str(&line("Target URL", &config.target));
    out.push_str("----------------------------------------------\n");
    out.push_str(&line("Response Code", &fmt_plain(entry.response_code)));
    out.push_str(&line("Response Time", &fmt_unit(entry.response_time.as_ref(), "ms")));
    out.push_str(&line("Redirect Time", &fmt_unit(entry.redirect_time.as_ref(), "ms")));
    out.push_str(&line("DNS Time", &fmt_unit(entry.dns_time.as_ref(), "ms")));
    out.push_str(&line("SSL Time", &fmt_unit(entry.ssl_time.as_ref(), "ms")));
    out.push_str(&line("Connect Time", &fmt_unit(entry.connect_time.as_ref(), "ms")));
    out.push_str(&line("Wait Time", &fmt_unit(entry.wait_time.as_ref(), "ms")));
    out.push_str(&line("Receive Time", &fmt_unit(entry.receive_time.as_ref(), "ms")));
    out.push_str(&line("Total Time", &fmt_unit(entry.total_time.as_ref(), "ms")));
    out.push_str(&line("Throughput", &fmt_unit(entry.throughput.as_ref(), "bytes/sec")));
    out.push_str(&line("Wire Size", &fmt_unit(entry.wire_size.as_ref(), "bytes")));
    out.push_str(&line("Server IP", entry.server_ip.as_deref().unwrap_or(MISSING)));
    out.push_str(&line("SSL Cipher", entry.ssl_cipher.as_deref().unwrap_or(MISSING)));
    out.push_str(&line("SSL Version", entry.ssl_version.as_deref().unwrap_or(MISSING)));
    out.push_str(&line("Health Score", &fmt_score(entry.health_score)));
    out.push_str("==============================================\n\n");

    out
}

fn line(label: &str, value: &str) -> String {
    format!(" {label:<14}: {value}\n")
}

fn fmt_agent(entry: &ResultEntry) -> String {
    match &entry.agent {
        Some(agent) => format!("{} (ID: {})", agent.agent_name, agent.agent_id),
        None => MISSING.to_string(),
    }
}

fn fmt_plain<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}

fn fmt_unit<T: std::fmt::Display>(value: Option<&T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => MISSING.to_string(),
    }
}

fn fmt_score(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => MISSING.to_string(),
    }
}
