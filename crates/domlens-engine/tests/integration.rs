//! Integration tests - Full pipeline from HTML to rendered output
//!
//! Tests the complete workflow: HTML → parse → analyze → render → write

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use domlens_engine::render::{HtmlWriter, OutlineWriter, Rendered};
use domlens_engine::{
    AnalyzeError, Analyzer, Config, ERROR_PREFIX, PLACEHOLDER, ShortenClient, ShortenError,
    ShortenerConfig, View,
};

fn rendered(analyzer: &Analyzer) -> Rendered {
    match analyzer.view() {
        View::Tree(rendered) => rendered,
        other => panic!("expected a tree, got {other:?}"),
    }
}

// ============================================================================
// ANALYZER PIPELINE
// ============================================================================

#[test]
fn test_analyze_example_document() {
    let mut analyzer = Analyzer::new();
    analyzer.set_input(r#"<div class="x"><p>Hi</p></div>"#);
    analyzer.analyze().unwrap();

    let outline = OutlineWriter::new().write(&rendered(&analyzer));
    let lines: Vec<_> = outline.lines().collect();
    assert_eq!(
        lines,
        [
            "<html>",
            "  <head>",
            "  <body>",
            "    <div> class=\"x\"",
            "      <p>",
            "        Text: \"Hi\"",
        ]
    );
}

#[test]
fn test_parse_failure_replaces_previous_tree() {
    let mut analyzer = Analyzer::new();
    analyzer.set_input("<p>first</p>");
    analyzer.analyze().unwrap();
    assert!(matches!(analyzer.view(), View::Tree(_)));

    analyzer.set_input("   ");
    let err = analyzer.analyze().unwrap_err();
    assert!(matches!(err, AnalyzeError::Parse(_)));

    assert!(analyzer.tree().is_none());
    match analyzer.view() {
        View::Error(message) => {
            assert!(message.starts_with(ERROR_PREFIX));
            assert!(message.ends_with("no markup to analyze"));
        }
        other => panic!("expected an error view, got {other:?}"),
    }
}

#[test]
fn test_strict_config_reports_repairs() {
    let config = Config::from_toml_str("[parser]\nstrict = true\n").unwrap();
    let mut analyzer = Analyzer::from_config(&config).unwrap();

    analyzer.set_input("<!DOCTYPE html><b><i>misnested</b></i>");
    assert!(analyzer.analyze().is_err());
    assert!(analyzer.error().is_some());
}

#[test]
fn test_config_palette_flows_into_render() {
    let config = Config::from_toml_str("[render]\npalette = [\"even\", \"odd\"]\n").unwrap();
    let mut analyzer = Analyzer::from_config(&config).unwrap();
    analyzer.set_input("<p>x</p>");
    analyzer.analyze().unwrap();

    let outline = OutlineWriter::new().with_styles(true).write(&rendered(&analyzer));
    let lines: Vec<_> = outline.lines().collect();
    assert_eq!(lines[0], "<html> [even]");
    assert_eq!(lines[2], "  <body> [odd]");
    assert_eq!(lines[3], "    <p> [even]");
    assert_eq!(lines[4], "      Text: \"x\" [odd]");
}

#[test]
fn test_html_output_contains_every_unit() {
    let mut analyzer = Analyzer::new();
    analyzer.set_input("<ul><li>a</li><li>b</li></ul>");
    analyzer.analyze().unwrap();

    let html = HtmlWriter::new().write(&rendered(&analyzer));
    assert_eq!(html.matches("class=\"tree-element").count(), 6);
    assert_eq!(html.matches("class=\"tree-text").count(), 2);
    assert!(html.find("a&quot;").unwrap() < html.find("b&quot;").unwrap());
}

#[test]
fn test_placeholder_text() {
    assert!(!PLACEHOLDER.is_empty());
    assert_eq!(Analyzer::new().view(), View::Placeholder);
}

// ============================================================================
// URL SHORTENER
// ============================================================================

/// Serve a single canned HTTP response and hand back the raw request
fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            "{status_line}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (format!("http://{addr}"), handle)
}

fn client_for(base_url: String) -> ShortenClient {
    ShortenClient::new(&ShortenerConfig {
        base_url,
        redirect_prefix: "http://sho.rt/r/".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[test]
fn test_shorten_round_trip() {
    let (base, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"actualUrl":"https://example.com/long","shortUrl":"xyz"}"#,
    );

    let shortened = client_for(base).shorten("https://example.com/long").unwrap();
    assert_eq!(shortened.actual_url, "https://example.com/long");
    assert_eq!(shortened.short_url, "http://sho.rt/r/xyz");

    let request = server.join().unwrap();
    assert!(request.starts_with(
        "POST /url/shorten?actualUrl=https%3A%2F%2Fexample.com%2Flong HTTP/1.1"
    ));
    assert!(request.to_ascii_lowercase().contains("accept: application/json"));
}

#[test]
fn test_shorten_server_error() {
    let (base, server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}");

    let result = client_for(base).shorten("https://example.com");
    assert!(matches!(result, Err(ShortenError::Status(500))));
    server.join().unwrap();
}
