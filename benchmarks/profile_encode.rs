use std::convert::TryFrom;
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use pprof::ProfilerGuard;
use serde_json::{json, Value};
use sjson::Config;

struct Args {
    seconds: u64,
    out_prefix: PathBuf,
    frequency: u32,
    input: Option<PathBuf>,
    sorted: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seconds: 30,
        out_prefix: PathBuf::from("benchmarks/profiles/encode"),
        frequency: 100,
        input: None,
        sorted: false,
    };

    let mut argv = env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--seconds" => {
                let value = argv
                    .next()
                    .unwrap_or_else(|| "--seconds requires a value".to_string());
                args.seconds = value.parse().expect("invalid --seconds value");
            }
            "--out" => {
                let value = argv
                    .next()
                    .unwrap_or_else(|| "--out requires a value".to_string());
                args.out_prefix = PathBuf::from(value);
                if args.out_prefix.extension().is_some() {
                    args.out_prefix = args.out_prefix.with_extension("");
                }
            }
            "--freq" => {
                let value = argv
                    .next()
                    .unwrap_or_else(|| "--freq requires a value".to_string());
                args.frequency = value.parse().expect("invalid --freq value");
            }
            "--input" => {
                let value = argv
                    .next()
                    .unwrap_or_else(|| "--input requires a value".to_string());
                args.input = Some(PathBuf::from(value));
            }
            "--sorted" => {
                args.sorted = true;
            }
            _ => {
                eprintln!("unknown arg: {arg}");
            }
        }
    }

    args
}

fn generated_document() -> Value {
    let repos: Vec<Value> = (0..1000)
        .map(|i| {
            json!({
                "id": 10_000 + i,
                "name": format!("project-{i}"),
                "description": if i % 3 == 0 { Value::Null } else { json!(format!("tool {i}\n\"quoted\"")) },
                "stars": (i * 7919) % 100_000,
                "score": i as f64 / 7.0,
                "topics": (0..i % 4).map(|t| format!("topic-{t}")).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({ "repos": repos })
}

fn main() {
    let args = parse_args();
    let document: Value = match &args.input {
        Some(path) => {
            let bytes = fs::read(path).expect("failed to read --input file");
            serde_json::from_slice(&bytes).expect("failed to parse --input JSON")
        }
        None => generated_document(),
    };
    let config = Config::new().with_sort_map_keys(args.sorted);

    let guard = ProfilerGuard::new(i32::try_from(args.frequency).expect("invalid --freq value"))
        .expect("failed to start profiler");
    let start = Instant::now();
    let deadline = Duration::from_secs(args.seconds);
    let mut iterations = 0_u64;

    while start.elapsed() < deadline {
        let encoded = sjson::to_vec_with_config(&document, config).expect("encode failed");
        std::hint::black_box(encoded);
        iterations += 1;
    }

    eprintln!("iterations: {iterations}");

    if let Ok(report) = guard.report().build() {
        if let Some(parent) = args.out_prefix.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).expect("failed to create output dir");
            }
        }
        let svg_path = args.out_prefix.with_extension("svg");
        let mut svg = File::create(&svg_path).expect("failed to create svg output");
        report
            .flamegraph(&mut svg)
            .expect("failed to write flamegraph");
        eprintln!("wrote {}", svg_path.display());
    }
}
