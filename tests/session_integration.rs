// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against an in-process mock bridge.
//!
//! The mock speaks just enough of the telnet dialect to exercise the login
//! handshake, command exchanges and monitoring pushes, and records every
//! line the client sends so tests can assert on ordering and formatting.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use casetel::bridge::{Bridge, BridgeBuilder};
use casetel::error::{Error, ProtocolError};
use casetel::protocol::{SessionConfig, TelnetSession};
use casetel::registry::kitchen_zone_ids;
use casetel::types::{FadeTime, Level, ZoneId};

/// Starts a mock bridge and returns its port plus a receiver that yields
/// every line any client sends, in order.
async fn spawn_mock_bridge() -> (u16, mpsc::UnboundedReceiver<String>) {
    spawn_mock_bridge_with(respond).await
}

/// Starts a mock bridge with a custom command responder.
async fn spawn_mock_bridge_with(
    responder: fn(&str) -> String,
) -> (u16, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(handle_connection(stream, tx, responder));
        }
    });

    (port, rx)
}

async fn handle_connection(
    stream: TcpStream,
    tx: mpsc::UnboundedSender<String>,
    responder: fn(&str) -> String,
) {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);
    let mut line = String::new();

    // Login handshake: prompt, username, prompt, password, ready prompt
    write.write_all(b"login: ").await.unwrap();
    if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
        return;
    }
    let _ = tx.send(line.trim().to_string());

    write.write_all(b"password: ").await.unwrap();
    line.clear();
    if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
        return;
    }
    let _ = tx.send(line.trim().to_string());

    write.write_all(b"\r\nGNET> ").await.unwrap();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let command = line.trim().to_string();
        let _ = tx.send(command.clone());

        if command == "#MONITORING,255,1" {
            // Ack, then push an event once the client is in its read loop
            write.write_all(b"GNET> ").await.unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
            if write.write_all(b"~OUTPUT,27,1,50.00\r\n").await.is_err() {
                break;
            }
            continue;
        }

        let reply = responder(&command);
        if write.write_all(reply.as_bytes()).await.is_err() {
            break;
        }
    }
}

/// Canned replies for the command dialect.
fn respond(command: &str) -> String {
    if let Some(rest) = command.strip_prefix("?OUTPUT,") {
        let zone = rest.split(',').next().unwrap_or("0");
        return format!("~OUTPUT,{zone},1,75.50\r\nGNET> ");
    }
    if command.starts_with("#OUTPUT,99,") {
        return "~ERROR,6\r\nGNET> ".to_string();
    }
    match command {
        "?AREA" => "~AREA,2,Kitchen\r\n~AREA,3,Master Bedroom\r\nGNET> ".to_string(),
        "?ZONE" => {
            "~ZONE,27,2,Sink Light\r\n~ZONE,30,2,Island Pendants\r\n~ZONE,10,3,Bay Window Lights\r\nGNET> "
                .to_string()
        }
        "?OUTPUT" => "~OUTPUT,5,27,DIMMER\r\nGNET> ".to_string(),
        "?DEVICE" => "~DEVICE,1,Smart Bridge,BRIDGE\r\nGNET> ".to_string(),
        _ => "GNET> ".to_string(),
    }
}

/// Responder for a bridge that rejects every query.
fn respond_with_errors(command: &str) -> String {
    if command.starts_with('?') {
        return "~ERROR,4\r\nGNET> ".to_string();
    }
    respond(command)
}

async fn connect(port: u16) -> Bridge {
    BridgeBuilder::new("127.0.0.1")
        .port(port)
        .timeout(Duration::from_secs(2))
        .connect()
        .await
        .unwrap()
}

fn zone(id: u32) -> ZoneId {
    ZoneId::new(id).unwrap()
}

/// Drains everything currently recorded.
fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = rx.try_recv() {
        lines.push(line);
    }
    lines
}

#[tokio::test]
async fn login_sends_credentials_in_prompt_order() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let _bridge = connect(port).await;

    let lines = drain(&mut rx);
    assert_eq!(lines, vec!["lutron".to_string(), "integration".to_string()]);
}

#[tokio::test]
async fn custom_credentials_are_used() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let _bridge = BridgeBuilder::new("127.0.0.1")
        .port(port)
        .credentials("admin", "hunter2")
        .timeout(Duration::from_secs(2))
        .connect()
        .await
        .unwrap();

    let lines = drain(&mut rx);
    assert_eq!(lines, vec!["admin".to_string(), "hunter2".to_string()]);
}

#[tokio::test]
async fn set_level_sends_two_decimal_output_command() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;
    drain(&mut rx);

    bridge
        .set_level(zone(30), Level::new(33.3).unwrap())
        .await
        .unwrap();

    let lines = drain(&mut rx);
    assert_eq!(lines, vec!["#OUTPUT,30,1,33.30".to_string()]);
}

#[tokio::test]
async fn clamped_levels_reach_the_wire_in_range() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;
    drain(&mut rx);

    bridge
        .set_level(zone(27), Level::clamped(150.0))
        .await
        .unwrap();
    bridge
        .set_level(zone(27), Level::clamped(-10.0))
        .await
        .unwrap();

    let lines = drain(&mut rx);
    assert_eq!(
        lines,
        vec![
            "#OUTPUT,27,1,100.00".to_string(),
            "#OUTPUT,27,1,0.00".to_string(),
        ]
    );
}

#[tokio::test]
async fn output_level_parses_the_status_reply() {
    let (port, _rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;

    let level = bridge.output_level(zone(30)).await.unwrap();
    assert_eq!(level.value(), 75.5);

    // The observed level lands in the registry snapshot
    let registry = bridge.registry();
    assert_eq!(registry.get(zone(30)).unwrap().last_level(), Some(level));
}

#[tokio::test]
async fn batch_dispatch_completes_before_returning() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;
    drain(&mut rx);

    let zones = kitchen_zone_ids();
    let report = bridge.set_zones_batch(&zones, Level::FULL).await;

    assert_eq!(report.attempted, 4);
    assert!(report.is_complete());

    // Every command was already on the wire when the call returned
    let lines = drain(&mut rx);
    let outputs: Vec<_> = lines
        .iter()
        .filter(|l| l.starts_with("#OUTPUT,"))
        .collect();
    assert_eq!(outputs.len(), 4);
    for id in [27, 30, 31, 33] {
        assert!(lines.contains(&format!("#OUTPUT,{id},1,100.00")));
    }
}

#[tokio::test]
async fn bridge_error_line_maps_to_protocol_error() {
    let (port, _rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;

    let err = bridge.set_level(zone(99), Level::FULL).await.unwrap_err();
    match err {
        Error::Protocol(ProtocolError::Bridge(message)) => {
            assert!(message.starts_with("~ERROR"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn silent_server_times_out_during_login() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    // Accept the connection, then say nothing
    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    let config = SessionConfig::new("127.0.0.1")
        .port(port)
        .timeout(Duration::from_millis(200));
    let err = TelnetSession::connect(&config).await.unwrap_err();
    assert!(matches!(err, ProtocolError::Timeout(_)));
}

#[tokio::test]
async fn discover_rebuilds_the_registry_from_the_sweep() {
    let (port, _rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;

    let found = bridge.discover().await.unwrap();
    assert_eq!(found, 3);

    let registry = bridge.registry();
    let sink = registry.get(zone(27)).unwrap();
    assert_eq!(sink.name(), "Sink Light");
    assert_eq!(sink.area(), "Kitchen");
    assert_eq!(sink.kind(), Some("DIMMER"));

    let bay = registry.get(zone(10)).unwrap();
    assert_eq!(bay.area(), "Master Bedroom");
}

#[tokio::test]
async fn discover_surfaces_the_error_when_every_query_fails() {
    let (port, _rx) = spawn_mock_bridge_with(respond_with_errors).await;
    let bridge = connect(port).await;

    let err = bridge.discover().await.unwrap_err();
    assert!(matches!(err, Error::Protocol(ProtocolError::Bridge(_))));

    // The registry keeps its previous contents after a failed sweep
    assert_eq!(bridge.registry().len(), 5);
}

#[tokio::test]
async fn set_level_with_fade_carries_whole_seconds() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;
    drain(&mut rx);

    bridge
        .set_level_with_fade(zone(30), Level::HALF, FadeTime::from_secs(3))
        .await
        .unwrap();

    let lines = drain(&mut rx);
    assert_eq!(lines, vec!["#OUTPUT,30,1,50.00,3".to_string()]);
}

#[tokio::test]
async fn monitor_delivers_pushed_events() {
    let (port, mut rx) = spawn_mock_bridge().await;
    let bridge = connect(port).await;
    drain(&mut rx);

    let monitor = bridge.monitor().await.unwrap();
    let mut events = monitor.subscribe();

    let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("no event within two seconds")
        .unwrap();

    match event {
        casetel::BridgeEvent::Output(status) => {
            assert_eq!(status.zone.value(), 27);
            assert_eq!(status.level.unwrap().value(), 50.0);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    monitor.stop().await;

    // The monitoring session enabled reporting on its own connection
    let lines = drain(&mut rx);
    assert!(lines.contains(&"#MONITORING,255,1".to_string()));
}
