//! End-to-end runs through the library API with a simulated transport

use anyhow::anyhow;
use proxy_verify::progress::hidden_bar;
use proxy_verify::{
    CancelFlag, CheckerConfig, LoadError, ProbeContext, ProbeResponse, ProbeTransport,
    ProtocolAttempt, ProxyChecker, ProxyParser, ProxyType, ResultWriter,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Each endpoint answers for exactly one protocol
struct OneProtocolEach(Vec<(&'static str, ProxyType)>);

impl ProbeTransport for OneProtocolEach {
    async fn fetch(&self, attempt: &ProtocolAttempt) -> anyhow::Result<ProbeResponse> {
        let works = self
            .0
            .iter()
            .any(|(endpoint, proxy_type)| {
                *proxy_type == attempt.proxy_type && attempt.url.ends_with(&format!("://{}", endpoint))
            });
        if works {
            Ok(ProbeResponse::new(200, r#"{"ip":"198.51.100.20"}"#))
        } else {
            Err(anyhow!("proxy handshake failed"))
        }
    }
}

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("proxy-verify-it-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn read_lines(dir: &Path, proxy_type: ProxyType) -> Vec<String> {
    fs::read_to_string(dir.join(proxy_type.file_name()))
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_socks5_and_http_candidates_land_in_their_files() {
    let dir = temp_dir();
    let input = dir.join("proxies.txt");
    fs::write(&input, "1.2.3.4:1080\n\n  5.6.7.8:8080  \n").unwrap();

    let candidates = ProxyParser::load_file(&input).unwrap();
    let config = CheckerConfig::new().with_output_dir(dir.clone());
    let ctx = ProbeContext::new(CancelFlag::new(), ResultWriter::new(&config.output_dir, hidden_bar()));
    let transport = OneProtocolEach(vec![
        ("1.2.3.4:1080", ProxyType::Socks5),
        ("5.6.7.8:8080", ProxyType::Http),
    ]);
    let checker = ProxyChecker::with_transport(config, transport);

    checker.check_all(candidates, &ctx).await;

    assert_eq!(read_lines(&dir, ProxyType::Socks5), vec!["1.2.3.4:1080"]);
    assert_eq!(read_lines(&dir, ProxyType::Http), vec!["5.6.7.8:8080"]);
    assert!(read_lines(&dir, ProxyType::Socks4).is_empty());
    assert_eq!(ctx.writer.finished(), 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_rerun_appends_duplicates() {
    let dir = temp_dir();
    let transport = OneProtocolEach(vec![("1.2.3.4:1080", ProxyType::Socks4)]);
    let checker = ProxyChecker::with_transport(CheckerConfig::new(), transport);

    for _ in 0..2 {
        let ctx = ProbeContext::new(CancelFlag::new(), ResultWriter::new(&dir, hidden_bar()));
        checker
            .check_all(ProxyParser::parse_string("1.2.3.4:1080"), &ctx)
            .await;
    }

    assert_eq!(
        read_lines(&dir, ProxyType::Socks4),
        vec!["1.2.3.4:1080", "1.2.3.4:1080"]
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_input_creates_no_output() {
    let dir = temp_dir();

    let err = ProxyParser::load_file(dir.join("proxies.txt")).unwrap_err();

    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(err.to_string().contains("not found"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    fs::remove_dir_all(&dir).unwrap();
}
