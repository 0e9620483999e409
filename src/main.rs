use docopt::Docopt;
use log::info;
use mazes::{
    cells::GridCoordinate,
    generators::MazeAlgorithm,
    grids::{large_grid, LargeGrid},
    pathing,
    units::{ColumnsCount, RowsCount},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--algorithm=<name>] [--rows=<r>] [--columns=<c>] [--seed=<s>] [--show-path]

Options:
    -h --help              Show this screen.
    --algorithm=<name>     One of binary, sidewinder, aldous-broder, wilson, hunt-kill or
                           recursive-backtracker [default: recursive-backtracker].
    --rows=<r>             Number of rows in the maze grid [default: 20].
    --columns=<c>          Number of columns in the maze grid [default: 20].
    --seed=<s>             Seed for the random number generator. A random seed is chosen if not given.
    --show-path            Print the cells along the longest path through the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_algorithm: String,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Mazes(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        // --help and --version are not failures
        Err(e) if !e.fatal() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let algorithm: MazeAlgorithm = args.flag_algorithm.parse()?;
    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let mut maze_grid = large_grid(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns))
        .chain_err(|| format!("Failed to create a {} x {} grid", args.flag_rows, args.flag_columns))?;

    info!("generating {} x {} maze with {} (seed {})", args.flag_rows, args.flag_columns, algorithm, seed);
    algorithm.generate(&mut maze_grid, &mut rng);

    print_summary(&maze_grid, algorithm, seed, args.flag_show_path)
}

fn print_summary(maze_grid: &LargeGrid,
                 algorithm: MazeAlgorithm,
                 seed: u64,
                 show_path: bool)
                 -> Result<()> {

    println!("algorithm:    {}", algorithm);
    println!("grid:         {} x {} ({} cells)", maze_grid.rows().0, maze_grid.columns().0, maze_grid.size());
    println!("seed:         {}", seed);
    println!("links:        {}", maze_grid.links_count());
    println!("perfect maze: {}", pathing::is_perfect_maze(maze_grid));
    println!("dead ends:    {}", maze_grid.dead_ends().len());

    let origin = GridCoordinate::new(0, 0);
    let distances = pathing::Distances::<u32>::for_grid(maze_grid, origin)
        .ok_or("The grid has no north west corner cell")?;
    let (furthest, furthest_distance) = distances.max();
    println!("farthest from {}: {} at distance {}",
             format_coordinate(origin),
             format_coordinate(furthest),
             furthest_distance);

    let longest_path = pathing::longest_path::<u32, u32>(maze_grid).unwrap_or_else(Vec::new);
    if let (Some(start), Some(end)) = (longest_path.first(), longest_path.last()) {
        println!("longest path: {} cells from {} to {}",
                 longest_path.len(),
                 format_coordinate(*start),
                 format_coordinate(*end));
    }

    if show_path {
        let path_text = longest_path.iter()
            .map(|coord| format_coordinate(*coord))
            .collect::<Vec<_>>()
            .join(" -> ");
        println!("{}", path_text);
    }

    Ok(())
}

fn format_coordinate(coord: GridCoordinate) -> String {
    format!("({}, {})", coord.row, coord.column)
}
