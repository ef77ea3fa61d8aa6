//! Line-oriented driver for the solver.
//!
//! Reads a board, the robots and the target from stdin and prints the length
//! of the found path:
//!
//! ```txt
//! 16                  side length
//! 4 5 r               wall lines: <col> <row> <t|b|l|r>, terminated by "."
//! .
//! r 0 0               robot lines: <r|b|g|y> <col> <row>, terminated by "."
//! b 9 0
//! .
//! r 8 0               the target: <r|b|g|y> <col> <row>
//! ```
//!
//! The first argument picks the strategy (`bfs`, `dijkstra`, `astar` or
//! `greedy`, defaulting to `astar`), `-v` lists the moves of the solution.
//! The search is polled one expansion at a time and reports on stderr every
//! 100000 expansions, so a slow search never leaves the terminal guessing.

use std::env;
use std::process;

use log::debug;
use text_io::{read, try_scan};

use rebound_board::{Board, Direction, Position, Robot, RobotPositions, Round, Target};
use rebound_solver::{Algorithm, SearchStatus, Solver};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|arg| arg == "-v");

    let algorithm = match args.get(1).filter(|arg| arg.as_str() != "-v") {
        Some(name) => name.parse::<Algorithm>().unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(2)
        }),
        None => Algorithm::AStar,
    };

    let size_string: String = read!("{}\n");
    let size = size_string.trim().parse::<u16>().expect("invalid side length");

    let mut board = Board::new_empty(size).with_center_block();

    // walls
    {
        let fields = board.get_mut_fields();
        loop {
            let line: String = read!("{}\n");
            let parts: Vec<&str> = line.split_whitespace().collect();

            if parts.len() < 3 {
                break;
            }

            let col = parts[0].parse::<usize>().expect("invalid wall column");
            let row = parts[1].parse::<usize>().expect("invalid wall row");
            fields[col][row].walls.insert(parse_side(parts[2]));
        }
    }

    // robots
    let mut poses = Vec::with_capacity(4);
    loop {
        let line: String = read!("{}\n");
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 3 {
            break;
        }

        let color = parse_color(parts[0]);
        let col = parts[1].parse::<u16>().expect("invalid robot column");
        let row = parts[2].parse::<u16>().expect("invalid robot row");
        poses.push((color, Position::new(col, row)));
    }

    let positions = RobotPositions::from_poses(&poses).unwrap_or_else(|err| {
        eprintln!("invalid configuration: {}", err);
        process::exit(2)
    });

    // target
    let target_string: String = read!("{}\n");
    let parts: Vec<&str> = target_string.split_whitespace().collect();
    let target = Target::new(
        parse_color(parts[0]),
        Position::new(
            parts[1].parse::<u16>().expect("invalid target column"),
            parts[2].parse::<u16>().expect("invalid target row"),
        ),
    );

    debug!("solving with {} for {}", algorithm, target);
    let round = Round::new(board, target);

    let mut solver = algorithm.begin(round, positions).unwrap_or_else(|err| {
        eprintln!("invalid configuration: {}", err);
        process::exit(2)
    });

    let mut expansions: u64 = 0;
    let outcome = loop {
        match solver.step() {
            SearchStatus::Searching => {
                expansions += 1;
                if expansions % 100_000 == 0 {
                    eprintln!("still searching, {} states expanded", expansions);
                }
            }
            terminal => break terminal,
        }
    };

    match outcome {
        SearchStatus::Solved(path) => {
            println!("{}", path.len());

            if verbose {
                for (move_n, moved) in path.movements().iter().enumerate() {
                    println!(
                        " {:>2}  {:<8}{:<6}{:?}",
                        move_n + 1,
                        moved.robot,
                        moved.direction,
                        moved.position
                    );
                }
            }
        }
        SearchStatus::Exhausted => println!("no solution"),
        SearchStatus::Searching => unreachable!(),
    }
}

fn parse_side(side: &str) -> Direction {
    match side {
        "t" => Direction::Up,
        "b" => Direction::Down,
        "l" => Direction::Left,
        "r" => Direction::Right,
        _ => panic!("Side {:?} does not exist", side),
    }
}

fn parse_color(color: &str) -> Robot {
    match color {
        "r" => Robot::Red,
        "b" => Robot::Blue,
        "g" => Robot::Green,
        "y" => Robot::Yellow,
        _ => panic!("Color {:?} does not exist", color),
    }
}
