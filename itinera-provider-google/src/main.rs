//! itinera-provider-google - Google Calendar provider for itinera
//!
//! This binary implements the itinera provider protocol, communicating
//! with the CLI via JSON over stdin/stdout. It holds no configuration of
//! its own: OAuth credentials arrive inside each request and leave with
//! the response.

mod auth;
mod google;
mod session;

use std::io::{self, BufRead, Write};

use itinera_core::protocol::{AuthenticateParams, Command, CreateEventParams, Request, Response};

#[tokio::main]
async fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = Response::error(&format!("Failed to parse request: {}", e));
                writeln!(stdout, "{}", response).unwrap();
                stdout.flush().unwrap();
                continue;
            }
        };

        let response = handle_request(request).await;

        writeln!(stdout, "{}", response).unwrap();
        stdout.flush().unwrap();
    }
}

async fn handle_request(request: Request) -> String {
    match request.command {
        Command::Authenticate => handle_authenticate(&request.params).await,
        Command::CreateEvent => handle_create_event(&request.params).await,
    }
}

async fn handle_authenticate(params: &serde_json::Value) -> String {
    let params: AuthenticateParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match auth::authenticate(&params.credentials).await {
        Ok(account) => Response::success(account),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

async fn handle_create_event(params: &serde_json::Value) -> String {
    let params: CreateEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match google::create_event(&params).await {
        Ok(created) => Response::success(created),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
