use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::api::JourneyCreateRequest;
use crate::core::client::{Gateway, RequestError};
use crate::ui::prompt::{PromptError, PromptInput, Prompter};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream.read(&mut chunk).await.map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.expect("header end should exist");
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream.read(&mut chunk).await.map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    }
}

/// Serve exactly one request with the given status and JSON body, returning
/// what the client sent.
pub async fn spawn_json_server(
    status: u16,
    body: Value,
) -> (SocketAddr, JoinHandle<Result<CapturedRequest, String>>) {
    spawn_raw_server(status, "application/json", body.to_string()).await
}

/// Serve exactly one request with an arbitrary body and content type.
pub async fn spawn_raw_server(
    status: u16,
    content_type: &'static str,
    body: impl Into<String>,
) -> (SocketAddr, JoinHandle<Result<CapturedRequest, String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let body = body.into();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
        let captured = read_http_request(&mut stream).await?;
        let response = format!(
            "HTTP/1.1 {status} {}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            reason_phrase(status),
            body.len(),
            body
        );
        stream
            .write_all(response.as_bytes())
            .await
            .map_err(|err| err.to_string())?;
        stream.flush().await.map_err(|err| err.to_string())?;
        Ok(captured)
    });

    (addr, handle)
}

/// Accept connections and read requests but never answer.
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((mut stream, _)) = listener.accept().await {
            let _ = read_http_request(&mut stream).await;
            held.push(stream);
        }
    });

    addr
}

/// An address that refuses connections.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    addr
}

/// Feeds canned lines to the wizard or chat loop. Running out of script reads
/// as end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    script: VecDeque<PromptInput>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: lines
                .into_iter()
                .map(|line| PromptInput::Line(line.into()))
                .collect(),
            prompts: Vec::new(),
        }
    }

    pub fn then(mut self, input: PromptInput) -> Self {
        self.script.push_back(input);
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str, _placeholder: Option<&str>) -> Result<PromptInput, PromptError> {
        self.prompts.push(prompt.to_string());
        Ok(self.script.pop_front().unwrap_or(PromptInput::EndOfInput))
    }
}

/// Gateway double that replays queued outcomes and records every call.
#[derive(Default)]
pub struct RecordingGateway {
    message_outcomes: Mutex<VecDeque<Result<Value, RequestError>>>,
    journey_outcomes: Mutex<VecDeque<Result<Value, RequestError>>>,
    pub messages: Mutex<Vec<(String, String, String)>>,
    pub journeys: Mutex<Vec<JourneyCreateRequest>>,
    pub health_calls: AtomicUsize,
}

impl RecordingGateway {
    pub fn with_messages(outcomes: Vec<Result<Value, RequestError>>) -> Self {
        Self {
            message_outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    pub fn push_journey_outcome(&self, outcome: Result<Value, RequestError>) {
        self.journey_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn journey_requests(&self) -> Vec<JourneyCreateRequest> {
        self.journeys.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn health_check(&self) -> Result<Value, RequestError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::json!({"status": "ok"}))
    }

    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
        surface: &str,
    ) -> Result<Value, RequestError> {
        self.messages.lock().unwrap().push((
            session_id.to_string(),
            message.to_string(),
            surface.to_string(),
        ));
        self.message_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({})))
    }

    async fn create_journey_direct(
        &self,
        request: &JourneyCreateRequest,
    ) -> Result<Value, RequestError> {
        self.journeys.lock().unwrap().push(request.clone());
        self.journey_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({})))
    }
}
