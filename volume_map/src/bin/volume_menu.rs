//! Interactive mixer menu: inspect a backend's native range and set levels
//! by percentage or by fingertip distance.

use volume_map::{AmixerControl, DistanceMap, SimMixer, VolumeControl, VolumeLevel};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              Pinch Volume — Mixer Menu               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let Some(mut mixer) = pick_backend(&mut input) else {
        println!();
        return;
    };
    let range = mixer.range();
    println!("  Native range: {} … {}", range.min, range.max);
    println!();

    let applied = menu(&mut input, &mut mixer);
    log::info!("{} levels applied", applied);
}

/// Run the menu until `q` or end of input. Returns how many levels were set.
fn menu<R: BufRead, V: VolumeControl + ?Sized>(input: &mut R, mixer: &mut V) -> usize {
    let map = DistanceMap::default();
    let mut applied = 0;

    loop {
        print_menu();
        let Some(choice) = read_line(input, "Command (1–2, or q to quit): ") else {
            break;
        };

        let level = match choice.trim() {
            "q" | "Q" => break,
            "1" => {
                let Some(text) = read_line(input, "  Percent 0–100: ") else { break };
                match text.trim().parse::<f64>() {
                    Ok(p)  => VolumeLevel::new(p),
                    Err(_) => { println!("  ⚠  '{}' is not a number.\n", text.trim()); continue; }
                }
            }
            "2" => {
                let Some(text) = read_line(input, "  Distance in px: ") else { break };
                match text.trim().parse::<f64>() {
                    Ok(d) => {
                        let v = map.volume_for(d);
                        println!("  {} px → {}", d, v);
                        v
                    }
                    Err(_) => { println!("  ⚠  '{}' is not a number.\n", text.trim()); continue; }
                }
            }
            _ => { println!("  ⚠  Please enter 1–2 or q.\n"); continue; }
        };

        match mixer.set_volume(level) {
            Ok(native) => {
                applied += 1;
                println!("  ✓  {} → native {:.2}\n", level, native);
            }
            Err(e) => println!("  ⚠  {}\n", e),
        }
    }

    println!("\nGoodbye!\n");
    applied
}

fn pick_backend<R: BufRead>(input: &mut R) -> Option<Box<dyn VolumeControl>> {
    println!("  Backend: 1. simulated (dB)   2. amixer");
    let choice = read_line(input, "  Choice (1–2, default 1): ")?;
    let mixer: Box<dyn VolumeControl> = match choice.trim() {
        "2" => {
            let control = read_line(input, "  Mixer control (default Master): ")?;
            let control = match control.trim() {
                "" => "Master",
                c  => c,
            };
            match AmixerControl::open(control) {
                Ok(m)  => Box::new(m),
                Err(e) => {
                    println!("  ⚠  {} — using simulated mixer", e);
                    Box::new(SimMixer::default())
                }
            }
        }
        _ => Box::new(SimMixer::default()),
    };
    Some(mixer)
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    println!("  │  1. Set volume by percent                            │");
    println!("  │  2. Set volume by fingertip distance (80–250 px)     │");
    println!("  └──────────────────────────────────────────────────────┘");
}

/// `None` once input is closed or unreadable.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_)          => Some(buf),
    }
}
