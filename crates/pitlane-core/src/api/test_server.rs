//! Loopback HTTP/1.1 server for running `ApiClient` against real responses.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Maps a request path (e.g. `/f1/races.php?season=2021`) to a status and body.
pub(crate) type Route = fn(&str) -> (u16, String);

/// Serve `route` on an ephemeral port. Returns the API base URL.
pub(crate) fn serve(route: Route) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || respond(stream, route));
        }
    });

    format!("http://{}/f1", addr)
}

fn respond(mut stream: TcpStream, route: Route) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    let (status, body) = route(&path);
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Internal Server Error",
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Two races (out of order), one qualifying row and one result for round 1.
pub(crate) fn season_route(path: &str) -> (u16, String) {
    let body = if path.contains("/races.php") {
        r#"[{"round": 2, "name": "Saudi Arabian Grand Prix", "year": 2021},
            {"round": 1, "name": "Bahrain Grand Prix", "year": 2021}]"#
    } else if path.contains("/qualifying.php") {
        r#"[{"race": {"round": 1}, "position": 1,
             "driver": {"forename": "Max", "surname": "Verstappen"},
             "constructor": {"name": "Red Bull"},
             "q1": "1:30.499", "q2": "1:30.318", "q3": "1:28.997"}]"#
    } else if path.contains("/results.php") {
        r#"[{"race": {"round": 1}, "position": 1,
             "driver": {"forename": "Lewis", "surname": "Hamilton"},
             "constructor": {"name": "Mercedes"}, "laps": null, "points": 0}]"#
    } else {
        return (404, "no such endpoint".to_string());
    };
    (200, body.to_string())
}

/// Like `season_route`, but the qualifying endpoint answers 500.
pub(crate) fn failing_qualifying_route(path: &str) -> (u16, String) {
    if path.contains("/qualifying.php") {
        (500, "boom".to_string())
    } else {
        season_route(path)
    }
}
