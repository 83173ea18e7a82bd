//! Application state and event loop.
//!
//! The client keeps no history of its own beyond the visible transcript;
//! the backend owns the session. One session id is drawn per process and
//! sent with every prompt.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use sb_common::schema::HealthResponse;
use tokio::sync::mpsc;

use crate::client::{BridgeClient, StreamEvent};
use crate::ui;

/// How often the background task polls `/health`.
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Render tick; also bounds how long stream events sit undrained.
const TICK: Duration = Duration::from_millis(100);

/// Session ids are decimal numbers below this bound (at most eight digits).
pub const SESSION_ID_SPACE: i64 = 100_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Clone, Debug)]
pub struct Entry {
    pub role: Role,
    pub text: String,
}

/// Last known health of the bridge and everything behind it.
#[derive(Clone, Debug, Default)]
pub struct HealthView {
    /// The bridge answered the poll at all.
    pub bridge_reachable: bool,
    pub superbuilder_connected: bool,
    pub llm_ready: bool,
    pub message: String,
}

pub struct App {
    client: BridgeClient,
    pub entries: Vec<Entry>,
    pub input: String,
    pub session_id: i64,
    pub health: HealthView,
    /// A reply is still arriving; input is held until it finishes.
    pub streaming: bool,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_offset: usize,
    running: bool,
    stream_rx: Option<mpsc::Receiver<StreamEvent>>,
}

impl App {
    pub fn new(client: BridgeClient) -> Self {
        Self {
            client,
            entries: Vec::new(),
            input: String::new(),
            session_id: session_id_from_clock(chrono::Utc::now().timestamp_millis()),
            health: HealthView::default(),
            streaming: false,
            scroll_offset: 0,
            running: true,
            stream_rx: None,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut health_rx = spawn_health_poller(self.client.clone());

        terminal.draw(|frame| ui::render(frame, self))?;

        while self.running {
            tokio::select! {
                biased;
                maybe_event = events.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key);
                        }
                    }
                }
                _ = tokio::time::sleep(TICK) => {}
            }

            self.drain_stream();
            while let Ok(update) = health_rx.try_recv() {
                self.apply_health(update);
            }

            terminal.draw(|frame| ui::render(frame, self))?;
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_transcript();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(10),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Sends the typed prompt, unless it is empty or a reply is in flight.
    pub fn submit(&mut self) {
        if self.streaming {
            return;
        }
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() {
            return;
        }
        self.input.clear();

        self.entries.push(Entry {
            role: Role::User,
            text: prompt.clone(),
        });
        self.entries.push(Entry {
            role: Role::Assistant,
            text: String::new(),
        });
        self.scroll_offset = 0;

        self.stream_rx = Some(self.client.stream_chat(prompt, self.session_id));
        self.streaming = true;
    }

    pub fn clear_transcript(&mut self) {
        self.entries.clear();
        self.scroll_offset = 0;
    }

    fn drain_stream(&mut self) {
        let mut events = Vec::new();
        if let Some(rx) = self.stream_rx.as_mut() {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            self.apply_stream_event(event);
        }
    }

    /// Folds one stream event into the transcript.
    pub fn apply_stream_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Chunk(text) => {
                if let Some(entry) = self.entries.last_mut() {
                    if entry.role == Role::Assistant {
                        entry.text.push_str(&text);
                    }
                }
                self.scroll_offset = 0;
            }
            StreamEvent::Done => {
                self.streaming = false;
                self.stream_rx = None;
            }
            StreamEvent::Failed(msg) => {
                if let Some(entry) = self.entries.last_mut() {
                    if entry.role == Role::Assistant {
                        entry.text.push_str(&format!("\n\n[ERROR] {msg}"));
                    }
                }
                self.streaming = false;
                self.stream_rx = None;
                self.scroll_offset = 0;
            }
        }
    }

    fn apply_health(&mut self, update: Option<HealthResponse>) {
        self.health = match update {
            Some(h) => HealthView {
                bridge_reachable: true,
                superbuilder_connected: h.superbuilder_connected,
                llm_ready: h.llm_ready,
                message: h.message.unwrap_or_default(),
            },
            None => HealthView {
                bridge_reachable: false,
                superbuilder_connected: false,
                llm_ready: false,
                message: format!("Bridge unreachable at {}", self.client.base_url()),
            },
        };
    }
}

fn spawn_health_poller(client: BridgeClient) -> mpsc::Receiver<Option<HealthResponse>> {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        loop {
            let update = client.health().await;
            if tx.send(update).await.is_err() {
                break;
            }
            tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
        }
    });
    rx
}

/// Derives this process's session id from the wall clock, truncated to the
/// id space. `rem_euclid` keeps the result non-negative whatever the clock
/// says.
pub fn session_id_from_clock(now_ms: i64) -> i64 {
    now_ms.rem_euclid(SESSION_ID_SPACE)
}
