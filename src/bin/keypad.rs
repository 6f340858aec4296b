//! Terminal keypad: one press (1-9) per line on stdin.

use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use keypad_gate::{check_launch_contract, parse_press, Gate, GateConfig, Hook, StdHost};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let config = GateConfig::from_env();
    let args: Vec<String> = env::args_os().map(|a| a.to_string_lossy().into_owned()).collect();
    let mut gate = Gate::new(StdHost::default(), &config);

    if let Err(err) = check_launch_contract(&args, &config.launch_name) {
        gate.teardown();
        tracing::error!(%err, "refusing to start");
        return ExitCode::SUCCESS;
    }

    let hook = gate.boot();
    tracing::info!(version = keypad_gate::VERSION, %hook, "keypad ready");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(%err, "stdin closed");
                break;
            }
        };
        let Some(press) = parse_press(&line) else {
            tracing::trace!(%line, "not a button");
            continue;
        };
        if gate.handle(press) == Hook::Terminal {
            break;
        }
    }
    ExitCode::SUCCESS
}
