//! Ward mesh simulator binary.
//!
//! Runs a batch simulation and prints JSON snapshots for the external
//! viewer to render.

use std::{env, fs, process};

use wardnet_sim::{
    random_grid, run_health, run_mesh, run_positioning, SimulationConfig, Vital,
};

const USAGE: &str = "\
usage: wardnet mesh <grid-file>
   or: wardnet health <grid-file> [ticks]
   or: wardnet gengrid [width length count [seed]]
   or: wardnet distmap <distances-file>";

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = args.get(1) else {
        println!("{USAGE}");
        return Ok(());
    };

    match command.as_str() {
        "mesh" => {
            let path = args.get(2).ok_or(USAGE)?;
            let grid = fs::read_to_string(path)?;
            let snapshot = run_mesh(&grid, &SimulationConfig::default())?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        "health" => {
            let path = args.get(2).ok_or(USAGE)?;
            let ticks: u64 = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(10);
            let grid = fs::read_to_string(path)?;
            let (snapshot, clock) = run_health(&grid, &SimulationConfig::default(), ticks)?;

            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            for monitor in clock.monitors() {
                for vital in Vital::ALL {
                    if let Some(measurement) = monitor.last_measurement(vital) {
                        println!(
                            "device {} {}: {} {}",
                            monitor.device,
                            vital,
                            measurement.value,
                            vital.unit()
                        );
                    }
                }
            }
        }
        "gengrid" => {
            let width: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(100);
            let length: usize = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(100);
            let count: u32 = args.get(4).map(|s| s.parse()).transpose()?.unwrap_or(2000);
            let seed: u64 = args.get(5).map(|s| s.parse()).transpose()?.unwrap_or(42);

            fs::write("random.txt", random_grid(width, length, count, seed))?;
            println!("wrote random.txt ({width}x{length}, up to {count} devices)");
        }
        "distmap" => {
            let path = args.get(2).ok_or(USAGE)?;
            let readings = fs::read_to_string(path)?;
            let map = run_positioning(&readings)?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        "help" | "-h" | "--help" => println!("{USAGE}"),
        unknown => return Err(format!("unknown command: {unknown}\n{USAGE}").into()),
    }

    Ok(())
}
