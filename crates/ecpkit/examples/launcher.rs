//! Minimal launcher-style consumer: opens the main chat surface,
//! subscribes to notifications, and keeps an unread badge.
//!
//! Run with:
//!   cargo run --example launcher
//!
//! A real embedding would bridge `HostPage` to the page's DOM and feed
//! `handle_message` from the window's message events; here the remote
//! application's side of the conversation is simulated inline.

use std::cell::RefCell;
use std::rc::Rc;

use ecpkit::client::{Client, ClientConfig, MAIN_FRAME_CONTAINER};
use ecpkit::host::MemoryHost;
use ecpkit::wire::{Envelope, EVENT_CLIENT_READY, EVENT_SDK_CALLBACK_DATA, EVENT_SDK_RESOLVE};
use serde_json::json;

const POD: &str = "https://pod.example";

#[derive(Debug, Default)]
struct LauncherState {
    unread: u64,
    muted: bool,
    last_message: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let host = MemoryHost::new("https://host.example").with_container(MAIN_FRAME_CONTAINER);
    let mut client = Client::new(host, ClientConfig::new(POD, "partner-demo"));

    client.on_ready(|| eprintln!("chat surface is ready"));
    client.open_stream("stream-1", MAIN_FRAME_CONTAINER)?;

    let state = Rc::new(RefCell::new(LauncherState::default()));

    let badge = Rc::clone(&state);
    client.on_unread_count_notification(None, move |data| {
        let mut state = badge.borrow_mut();
        state.unread = data["count"].as_u64().unwrap_or(0);
    })?;

    let inbox = Rc::clone(&state);
    client.on_message_notification(Some("stream-1"), move |data| {
        let mut state = inbox.borrow_mut();
        if state.muted {
            return;
        }
        if let Some(text) = data["message"].as_str() {
            state.last_message = Some(text.to_string());
        }
    })?;

    // The remote application boots and starts pushing notifications.
    client.handle_message(
        POD,
        &Envelope {
            event_type: EVENT_CLIENT_READY.to_string(),
            payload: None,
        },
    )?;

    let action_id = client.send_message("stream-1", "hello from the launcher", None)?;
    client.handle_message(
        POD,
        &Envelope::new(EVENT_SDK_RESOLVE, json!({ "id": action_id })),
    )?;

    client.handle_message(
        POD,
        &Envelope::new(
            EVENT_SDK_CALLBACK_DATA,
            json!({
                "id": "message-notification-stream-1",
                "data": { "message": "hi back!" },
            }),
        ),
    )?;
    client.handle_message(
        POD,
        &Envelope::new(
            EVENT_SDK_CALLBACK_DATA,
            json!({ "id": "unread-notification-undefined", "data": { "count": 1 } }),
        ),
    )?;

    let state = state.borrow();
    println!("unread badge: {}", state.unread);
    println!(
        "latest message: {}",
        state.last_message.as_deref().unwrap_or("(none)")
    );
    println!("frames mounted: {}", client.host().mounts().len());
    Ok(())
}
