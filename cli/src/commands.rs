use std::io::Write;

use limelight_core::context::AppConfigExt;
use limelight_overlay::spawn_overlays;
use limelight_core::shutdown;
use serde_json::json;

use crate::context::{CliContext, EngineSession};

/// Start every enabled overlay against the configured endpoints.
pub async fn start(ctx: &CliContext) {
    if ctx.is_running().await {
        println!("Overlay engine is already running");
        return;
    }

    let config = ctx.config.read().await.clone();
    let (controller, _) = shutdown::channel();
    let (tasks, push) = spawn_overlays(&config, reqwest::Client::new(), &controller);

    if tasks.is_empty() {
        // Dropping the controller tears down nothing; no task was spawned
        println!("No overlays enabled; nothing to start");
        return;
    }

    let session = EngineSession {
        controller,
        tasks,
        push,
    };
    if ctx.start_session(session).await.is_err() {
        println!("Overlay engine is already running");
        return;
    }
    println!("Overlay engine started");
}

/// Signal shutdown and wait for every overlay task to finish.
pub async fn stop(ctx: &CliContext) {
    match ctx.take_session().await {
        Some(mut session) => {
            session.controller.shutdown();
            session.tasks.join_all().await;
            println!("Overlay engine stopped");
        }
        None => println!("Overlay engine is not running"),
    }
}

pub async fn status(ctx: &CliContext) {
    let running = ctx.is_running().await;
    let config = ctx.config.read().await;

    println!("Engine:       {}", if running { "running" } else { "stopped" });
    println!("Snapshot URL: {}", config.endpoints.snapshot_url);
    println!("Push URL:     {}", config.endpoints.push_url);
    println!(
        "Overlays:     alerts={} now_playing={} milestones={} chatter_wall={}",
        on_off(config.overlays.alerts.enabled),
        on_off(config.overlays.now_playing.enabled),
        on_off(config.overlays.milestones.enabled),
        on_off(config.overlays.chatter_wall.enabled),
    );
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Print the full configuration.
pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match serde_json::to_string_pretty(&*config) {
        Ok(text) => println!("{text}"),
        Err(error) => println!("Could not render config: {error}"),
    }
}

/// Update the server endpoints and persist the config. Takes effect on
/// the next engine start.
pub async fn set_endpoint(ctx: &CliContext, snapshot: Option<&str>, push: Option<&str>) {
    if snapshot.is_none() && push.is_none() {
        println!("Nothing to change; pass --snapshot and/or --push");
        return;
    }

    let mut config = ctx.config.write().await;
    if let Some(url) = snapshot {
        config.endpoints.snapshot_url = url.to_string();
    }
    if let Some(url) = push {
        config.endpoints.push_url = url.to_string();
    }

    match config.save() {
        Ok(()) => {
            println!("Endpoints updated");
            if ctx.is_running().await {
                println!("Restart the engine to pick up the new endpoints");
            }
        }
        Err(error) => println!("Could not save config: {error}"),
    }
}

/// Inject an alert locally, bypassing the push transport. Useful for
/// checking timing and artwork without a server.
pub async fn send_alert(ctx: &CliContext, text: &str, duration: u64, image: &str, audio: &str) {
    let Some(sender) = ctx.push_sender().await else {
        println!("Alerts overlay is not running");
        return;
    };

    let raw = json!({
        "data": {"image": image, "audio": audio, "text": text},
        "duration": duration,
    })
    .to_string();

    if sender.deliver(raw) {
        println!("Alert queued");
    } else {
        println!("Alert dropped: one is already showing and one is pending");
    }
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").expect("error exiting");
    std::io::stdout().flush().expect("error flushing stdout");
}
