use std::env;
use std::fs;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use foonda::{random_solvable_board, solve, validate, Board, DirPath};

const RANDOM_ATTEMPTS: usize = 1000;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--random") => {
            let seed = args
                .get(2)
                .map(|s| s.parse::<u64>().expect("seed must be an unsigned integer"));
            random(seed);
        }
        Some(path) => solve_file(path),
        None => {
            eprintln!("Usage: foonda <board.json> | foonda --random [seed]");
            process::exit(1);
        }
    }
}

fn solve_file(path: &str) {
    let data = fs::read_to_string(path).expect("failed to read board file");
    let board: Board = serde_json::from_str(&data).expect("board file is not valid JSON");

    if let Err(err) = validate(&board) {
        for violation in &err.violations {
            eprintln!("{violation}");
        }
        process::exit(1);
    }

    match solve(&board) {
        Some(path) => println!("{}", path_string(&path)),
        None => println!("unsolvable"),
    }
}

fn random(seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match random_solvable_board(&mut rng, RANDOM_ATTEMPTS) {
        Some((board, path)) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&board).expect("board serializes")
            );
            println!("{board}");
            println!("solution: {}", path_string(&path));
        }
        None => {
            eprintln!("no solvable board in {RANDOM_ATTEMPTS} attempts");
            process::exit(1);
        }
    }
}

fn path_string(path: &DirPath) -> String {
    path.iter().map(|d| d.as_char()).collect()
}
