//! CLI wrapper for the autoprobe capability engine.
//!
//! Usage:
//!   autoprobe                   # Probe the full reference host
//!   autoprobe -m                # Probe the minimal reference host
//!   autoprobe -c <profile.toml> # Probe a host configured from a file
//!   autoprobe -h                # Show usage

use std::env;
use std::path::Path;
use std::process;

use autoprobe::engine::registry::CapabilityRegistry;
use autoprobe::host::profile::HostProfile;
use autoprobe::interp::script_host::new_standard_context;

fn main() {
    let args: Vec<String> = env::args().collect();

    let profile = match args.len() {
        1 => HostProfile::full(),
        2 => {
            let arg = &args[1];
            if arg == "-h" || arg == "--help" {
                print_usage();
                process::exit(0);
            }
            if arg == "-m" || arg == "--minimal" {
                HostProfile::minimal()
            } else {
                print_usage();
                process::exit(1);
            }
        }
        3 if args[1] == "-c" || args[1] == "--config" => {
            match HostProfile::load(Path::new(&args[2])) {
                Ok(profile) => profile,
                Err(e) => {
                    eprintln!("autoprobe: {}", e);
                    process::exit(1);
                }
            }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    };

    run_report(profile);
}

fn print_usage() {
    eprintln!("autoprobe - Runtime Capability Probing");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  autoprobe                   Probe the full reference host");
    eprintln!("  autoprobe -m                Probe the minimal reference host");
    eprintln!("  autoprobe -c <profile>      Probe a host configured from a file");
}

fn run_report(profile: HostProfile) {
    let ctx = new_standard_context(profile);
    let caps = CapabilityRegistry::build(ctx);

    for name in caps.capability_names() {
        match caps.check(name) {
            Ok(value) => println!("{}: {}", name, value),
            Err(e) => {
                eprintln!("autoprobe: fatal: {}", e);
                caps.restore();
                process::exit(2);
            }
        }
    }

    caps.restore();
}
