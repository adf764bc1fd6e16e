//! Interactive console: the view-glue consumer of reqease-core.
//!
//! Wires the knowledge store, workspace registry, and command palette
//! together behind a line-based prompt. Rendering is plain text; all state
//! and behavior live in the core crate.

use reqease_core::{
    group_by_category, is_triggered, CoreConfig, KbDraft, KbEvent, KbStore, Palette,
    PaletteAction, PaletteKey, SledBackend, Workspace, WorkspaceRegistry, SLASH_COMMANDS,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Pre-flight check: config loads, the knowledge DB opens, the collection parses.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking knowledge DB at {}... ", config.kb_path().display());
    let backend = SledBackend::open(config.kb_path())
        .map_err(|e| format!("knowledge DB LOCKED or inaccessible: {}", e))?;
    let store = KbStore::open(backend).map_err(|e| format!("knowledge load failed: {}", e))?;
    println!("OK ({} entries)", store.len());

    println!("\nAll systems GO. Ready to start the console.");
    Ok(())
}

fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[reqease-console] .env not loaded: {} (using system environment)", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::load().expect("load CoreConfig");
    let backend = SledBackend::open(config.kb_path()).expect("open knowledge DB");
    let mut store = KbStore::open(backend).expect("open knowledge store");
    let mut events = store.subscribe();
    let workspaces = WorkspaceRegistry::new();
    let mut palette = Palette::new(SLASH_COMMANDS);

    println!("{} console — type 'help' for commands, '/' for the palette", config.app_name);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::error!("stdin read failed: {e}");
                break;
            }
        }
        let line = line.trim_end_matches(['\r', '\n']);

        if is_triggered(line) {
            run_palette(&mut palette, line);
        } else {
            match line.trim() {
                "" => {}
                "quit" | "exit" => break,
                "help" => print_help(),
                other => run_command(other, &mut store, &workspaces, config.recent_limit),
            }
        }

        while let Ok(KbEvent::EntryAdded { id }) = events.try_recv() {
            println!("[kb] entry added: {}", id);
        }
    }
}

/// Shows the filtered, grouped palette for a `/`-prefixed line, then commits
/// the top match the way Enter would in the UI.
fn run_palette(palette: &mut Palette, line: &str) {
    palette.on_input(line);
    let groups = group_by_category(palette.matches());
    if groups.is_empty() {
        println!("no matching commands");
    }
    for (category, commands) in &groups {
        println!("{}", category);
        for cmd in commands {
            let marker = if palette.selected().map(|s| s.id) == Some(cmd.id) { ">" } else { " " };
            println!("  {} {:<18} {}", marker, cmd.command, cmd.description);
        }
    }
    if let PaletteAction::Commit(text) = palette.on_key(PaletteKey::Enter { shift: false }) {
        println!("inserted into input: {:?}", text);
    }
}

fn run_command(line: &str, store: &mut KbStore, workspaces: &WorkspaceRegistry, recent_limit: usize) {
    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "kb" => run_kb_command(rest, store, recent_limit),
        "ws" => run_ws_command(rest, workspaces),
        _ => println!("unknown command: {} (try 'help')", line),
    }
}

fn run_kb_command(rest: &str, store: &mut KbStore, recent_limit: usize) {
    let (sub, arg) = match rest.split_once(' ') {
        Some((sub, arg)) => (sub, arg.trim()),
        None => (rest, ""),
    };
    match sub {
        "add" if !arg.is_empty() => {
            let id = store.add_entry(KbDraft {
                application_name: arg.to_string(),
                ..KbDraft::default()
            });
            println!("saved: {}", id);
        }
        "add" => println!("usage: kb add <application name>"),
        "show" if !arg.is_empty() => match store.entry(arg) {
            Some(entry) => match serde_json::to_string_pretty(entry) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("render entry: {e}"),
            },
            // Absence is a view state, not an error.
            None => println!("KB item not found"),
        },
        "show" => println!("usage: kb show <id>"),
        "list" => {
            let limit = arg.parse().unwrap_or(recent_limit);
            for entry in store.recent(limit) {
                println!("{}  {}  {}", entry.id, entry.created_at.to_rfc3339(), entry.application_name);
            }
            println!("({} of {} entries)", store.recent(limit).len(), store.len());
        }
        _ => println!("usage: kb add|show|list"),
    }
}

fn run_ws_command(rest: &str, workspaces: &WorkspaceRegistry) {
    let (sub, arg) = match rest.split_once(' ') {
        Some((sub, arg)) => (sub, arg.trim()),
        None => (rest, ""),
    };
    match sub {
        "create" if !arg.is_empty() => match workspaces.create(arg, "", Vec::new()) {
            Ok(ws) => println!("created workspace {} ({})", ws.name, ws.id),
            Err(e) => println!("{}", e),
        },
        "create" => println!("usage: ws create <name>"),
        "rm" if !arg.is_empty() => match arg.parse::<Uuid>() {
            Ok(id) => match workspaces.remove(id) {
                Some(ws) => println!("removed {}", ws.name),
                None => println!("no workspace with id {}", id),
            },
            Err(_) => println!("not a workspace id: {}", arg),
        },
        "rm" => println!("usage: ws rm <id>"),
        "list" => {
            for ws in workspaces.list() {
                print_workspace(&ws);
            }
            println!("({} workspaces)", workspaces.len());
        }
        _ => println!("usage: ws create|rm|list"),
    }
}

fn print_workspace(ws: &Workspace) {
    println!("{}  {}  {} project(s)  [{}]", ws.id, ws.name, ws.project_count, ws.tags.join(", "));
}

fn print_help() {
    println!("  /<text>                 filter the slash-command palette");
    println!("  kb add <application>    save a knowledge base entry");
    println!("  kb show <id>            print one entry as JSON");
    println!("  kb list [n]             list the n most recent entries");
    println!("  ws create <name>        create a workspace");
    println!("  ws list                 list workspaces, newest first");
    println!("  ws rm <id>              delete a workspace");
    println!("  quit                    exit");
}
