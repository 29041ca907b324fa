//! LED cube animator CLI - create, inspect, export and preview animations.

use std::fs;
use std::path::PathBuf;
use std::thread;

use led_cube_animator::{
    EditorSession, Frame, ScanOrder,
    encode::{load_snapshot, save_snapshot, to_source_table},
    playback::TickOutcome,
    model::DEFAULT_FRAME_DURATION_MS,
    schema::EditorConfig,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => print_example_config(),
        "new" if args.len() >= 4 => cmd_new(&args[2], &args[3]),
        "info" if args.len() >= 3 => cmd_info(&args[2]),
        "code" if args.len() >= 3 => {
            let height_first = args[3..].iter().any(|a| a == "--height-first");
            cmd_code(&args[2], height_first);
        }
        "play" if args.len() >= 3 => {
            let cycles: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1);
            cmd_play(&args[2], cycles);
        }
        _ => {
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!();
    eprintln!("Design and export LED cube animations.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  new <config.json> <out.json>          Create a blank animation snapshot");
    eprintln!("  info <snapshot.json>                  Show dimensions and frames");
    eprintln!("  code <snapshot.json> [--height-first] Print the firmware image table");
    eprintln!("  play <snapshot.json> [cycles]         Preview playback in the terminal");
    eprintln!("  --example                             Print an example config");
}

fn cmd_new(config_path: &str, out_path: &str) {
    let config_str = fs::read_to_string(config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: EditorConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let session = EditorSession::new(&config).unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = save_snapshot(PathBuf::from(out_path), session.document()) {
        eprintln!("Error writing snapshot: {}", e);
        std::process::exit(1);
    }

    let dims = config.dimensions;
    println!(
        "Created {}x{}x{} animation in {}",
        dims.width, dims.height, dims.depth, out_path
    );
}

fn open_session(path: &str) -> EditorSession {
    let document = load_snapshot(path).unwrap_or_else(|e| {
        eprintln!("Error loading snapshot: {}", e);
        std::process::exit(1);
    });
    EditorSession::from_document(document)
}

fn cmd_info(path: &str) {
    let session = open_session(path);
    let doc = session.document();

    println!("LED Cube Animation");
    println!("==================");
    println!("Cube: {}x{}x{}", doc.width(), doc.height(), doc.depth());
    println!("Frames: {}", doc.frame_count());
    println!("Minimum duration: {}ms", doc.min_duration());
    println!("Loop length: {}ms", doc.total_duration_ms());
    println!();

    for (i, frame) in doc.frames().iter().enumerate() {
        println!(
            "  Frame {}: {}ms, {}/{} lit",
            i + 1,
            frame.duration_ms(),
            frame.lit_count(),
            frame.cells().len()
        );
    }
}

fn cmd_code(path: &str, height_first: bool) {
    let session = open_session(path);
    let order = ScanOrder::from_depth_before_height(!height_first);
    print!("{}", to_source_table(session.document(), order));
}

fn cmd_play(path: &str, cycles: usize) {
    let mut session = open_session(path);
    let total_ticks = playback_ticks(cycles, session.document().frame_count());
    if total_ticks == 0 {
        println!("Nothing to play");
        return;
    }

    let Some(mut tick) = session.toggle_playback() else {
        return;
    };
    render_frame(session.current(), session.current_frame());

    for _ in 1..total_ticks {
        thread::sleep(tick.delay);
        match session.tick(tick.token) {
            TickOutcome::Advanced { next, .. } => {
                render_frame(session.current(), session.current_frame());
                tick = next;
            }
            TickOutcome::Stale => break,
        }
    }
    thread::sleep(tick.delay);
    session.toggle_playback();
}

/// Frames shown for `cycles` loops, saturating on absurd cycle counts.
fn playback_ticks(cycles: usize, frame_count: usize) -> usize {
    cycles.saturating_mul(frame_count)
}

/// Print depth slices side by side, front slice first.
fn render_frame(index: usize, frame: &Frame) {
    println!("Frame {} ({}ms)", index + 1, frame.duration_ms());
    for y in 0..frame.height() {
        let mut line = String::new();
        for z in 0..frame.depth() {
            for x in 0..frame.width() {
                let lit = frame.cell(x, y, z).unwrap_or(false);
                line.push(if lit { '#' } else { '.' });
            }
            line.push_str("  ");
        }
        println!("  {}", line.trim_end());
    }
    println!();
}

fn print_example_config() {
    let config = EditorConfig {
        default_duration_ms: Some(DEFAULT_FRAME_DURATION_MS),
        ..EditorConfig::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cycles_play_nothing() {
        assert_eq!(playback_ticks(0, 5), 0);
        assert_eq!(playback_ticks(2, 3), 6);
    }

    #[test]
    fn test_cycle_count_saturates() {
        assert_eq!(playback_ticks(usize::MAX, 2), usize::MAX);
    }
}
