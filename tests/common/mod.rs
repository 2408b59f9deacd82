#![allow(dead_code)]

use approx::assert_relative_eq;
use koiviz::orbit::OrbitalElements;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

pub fn assert_orbit_close(actual: &OrbitalElements, expected: &OrbitalElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_relative_eq!(
        actual.longitude_of_ascending_node,
        expected.longitude_of_ascending_node,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.argument_of_periapsis,
        expected.argument_of_periapsis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.orbit_angular_rate,
        expected.orbit_angular_rate,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.body_radius, expected.body_radius, epsilon = epsilon);
    assert_eq!(actual.color, expected.color);
}

/// One canned HTTP answer.
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: &str) -> Self {
        CannedResponse {
            status: 200,
            body: body.to_string(),
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = find(buf, b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let body = &buf[header_end + 4..];
    if head.contains("transfer-encoding: chunked") {
        return find(body, b"0\r\n\r\n").is_some();
    }
    let length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}

/// Serve `responses` in order, one connection each, and hand back the raw requests.
pub async fn serve(responses: Vec<CannedResponse>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&buf) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            requests.push(String::from_utf8_lossy(&buf).into_owned());

            let reply = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.body.len(),
                response.body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        requests
    });

    (base_url, handle)
}
