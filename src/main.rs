//! Rig recording inspector - print the contents of a recorded take.

use std::fs;
use std::path::PathBuf;
use std::process;

use rig_recorder::RecorderConfig;
use rig_recorder::animation::{RecordingDocument, format_timecode};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <recording.dat>", args[0]);
        eprintln!();
        eprintln!("Inspect a recorded rig animation file.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  recording.dat  Path to a recording produced by the recorder");
        eprintln!();
        eprintln!("An example recorder configuration is printed with --example.");
        process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let path = PathBuf::from(&args[1]);
    let bytes = fs::read(&path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        process::exit(1);
    });

    let document = match RecordingDocument::from_bytes(&bytes) {
        Ok(Some(document)) => document,
        Ok(None) => {
            eprintln!("{}: empty file, nothing recorded", path.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error decoding {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    let duration = document.timeline().last().copied().unwrap_or(0.0);

    println!("Rig Recording");
    println!("=============");
    println!("File: {} ({} bytes)", path.display(), bytes.len());
    println!("Frames: {}", document.frame_count());
    println!(
        "Duration: {} ({:.3}s)",
        format_timecode(duration),
        duration
    );
    println!("Channel sets: {}", document.channel_set_count());
    println!();
    println!("Bones:");
    println!("  {} (root)", document.root().path());
    for set in document.auxiliary() {
        println!("  {}", set.path());
    }
}

fn print_example_config() {
    let config = RecorderConfig::default();

    println!("Example configuration (recorder.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
