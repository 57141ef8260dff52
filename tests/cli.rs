//! End-to-end tests of the nscrestc binary against a local one-shot HTTP responder.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

/// Serves exactly one request with `body` as JSON and hands the raw request head back.
fn serve_once(body: &'static str) -> anyhow::Result<(String, Receiver<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = match listener.accept() {
            Ok(conn) => conn,
            Err(_) => return,
        };

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        let _ = tx.send(String::from_utf8_lossy(&head).into_owned());

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    });

    Ok((url, rx))
}

fn nscrestc() -> Command {
    let mut cmd = Command::cargo_bin("nscrestc").unwrap();
    cmd.env_remove("GENERATE_ICINGA_COMMAND")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(30));
    cmd
}

fn received(rx: &Receiver<String>) -> String {
    rx.recv_timeout(Duration::from_secs(10))
        .expect("the responder should have received a request")
}

#[test]
fn probe_reports_reachable_agent() -> anyhow::Result<()> {
    let (url, rx) = serve_once("<html>NSClient++</html>")?;

    nscrestc()
        .args(["-u", url.as_str(), "-p", "secret"])
        .assert()
        .code(0)
        .stdout(format!("OK: NSClient API reachable on {}\n", url));

    let head = received(&rx);
    assert!(head.starts_with("GET / HTTP/1.1\r\n"), "{}", head);
    assert!(head.contains("password: secret\r\n"), "{}", head);
    Ok(())
}

#[test]
fn query_with_warning_result() -> anyhow::Result<()> {
    let (url, rx) = serve_once(
        r#"{"payload":[{"result":"WARNING","lines":[{"message":"disk low","perf":[{"alias":"used","int_value":{"value":95.5,"unit":"%","warning":80,"critical":90}}]}]}]}"#,
    )?;

    nscrestc()
        .args(["-u", url.as_str(), "-p", "secret", "check_drivesize", "show-all", "drive=C:"])
        .assert()
        .code(1)
        .stdout("disk low|'used'=95.5%;80;90\n");

    let head = received(&rx);
    assert!(
        head.starts_with("GET /query/check_drivesize?drive=C%3A&show-all= HTTP/1.1\r\n"),
        "{}",
        head
    );
    Ok(())
}

#[test]
fn empty_payload_is_unknown() -> anyhow::Result<()> {
    let (url, _rx) = serve_once(r#"{"header":{"source_id":""},"payload":[]}"#)?;

    nscrestc()
        .args(["-u", url.as_str(), "-p", "secret", "check_cpu"])
        .assert()
        .code(3)
        .stdout("UNKNOWN: The resultpayload size is 0\n");
    Ok(())
}

#[test]
fn undecodable_body_is_unknown() -> anyhow::Result<()> {
    let (url, _rx) = serve_once("403 Forbidden")?;

    nscrestc()
        .args(["-u", url.as_str(), "-p", "wrong", "check_cpu"])
        .assert()
        .code(3)
        .stdout("UNKNOWN: The resultpayload size is 0\n");
    Ok(())
}

#[test]
fn unrecognized_result_exits_ok() -> anyhow::Result<()> {
    let (url, _rx) = serve_once(r#"{"payload":[{"result":"PENDING","lines":[{"message":" waiting "}]}]}"#)?;

    nscrestc()
        .args(["-u", url.as_str(), "-p", "secret", "check_cpu"])
        .assert()
        .code(0)
        .stdout("waiting\n");
    Ok(())
}

#[test]
fn verbose_dumps_request_and_response() -> anyhow::Result<()> {
    let (url, _rx) = serve_once(r#"{"payload":[{"result":"CRITICAL","lines":[{"message":"down"}]}]}"#)?;

    nscrestc()
        .args(["-v", "-u", url.as_str(), "-p", "secret", "check_service"])
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("REQUEST:\n\"GET /query/check_service HTTP/1.1\\r\\n"))
        .stdout(predicate::str::contains("RESPONSE:\n\"HTTP/1.1 200 OK\\r\\n"))
        .stdout(predicate::str::ends_with("\ndown\n"));
    Ok(())
}

#[test]
fn unreachable_agent_is_unknown() -> anyhow::Result<()> {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        format!("http://{}", listener.local_addr()?)
    };

    nscrestc()
        .args(["-u", url.as_str(), "-p", "secret", "-t", "5"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("UNKNOWN: "));
    Ok(())
}

#[test]
fn malformed_url_is_unknown() {
    nscrestc()
        .args(["-u", "not a url", "-p", "secret", "check_cpu"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("UNKNOWN: parse \"not a url\""));
}

#[test]
fn missing_required_arguments() {
    nscrestc()
        .args(["-p", "secret"])
        .assert()
        .code(3)
        .stdout("")
        .stderr(predicate::str::starts_with("UNKNOWN: Missing required -u argument\n"))
        .stderr(predicate::str::contains("Usage:"));

    nscrestc()
        .args(["-u", "https://10.1.2.3:8443"])
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("UNKNOWN: Missing required -p argument\n"));
}

#[test]
fn invalid_timeout_is_unknown() {
    nscrestc()
        .args(["-u", "https://10.1.2.3:8443", "-p", "secret", "-t", "soon"])
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("UNKNOWN: "));
}

#[test]
fn generates_icinga_command() {
    nscrestc()
        .env("GENERATE_ICINGA_COMMAND", "1")
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("object CheckCommand \"nscrestc\" {\n"))
        .stdout(predicate::str::contains("\"-p\" = {"));
}
