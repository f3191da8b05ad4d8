use anyhow::Result;
use cave_core::mapgen::analyze_regions;
use cave_core::{CaveConfig, Grid, Pos, generate_cave};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 48)]
    width: usize,
    #[arg(long, default_value_t = 32)]
    height: usize,
    /// Percent chance for an interior cell to seed as floor (recommended 40-60)
    #[arg(long, default_value_t = 50)]
    fill: i32,
    /// Smoothing passes to run (recommended 2-5)
    #[arg(long, default_value_t = 3)]
    iterations: i32,
    /// Passes below this index use the big-area smoothing rule
    #[arg(long, default_value_t = 2)]
    cutoff: i32,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Emit the grid as JSON instead of ASCII
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = CaveConfig {
        width: args.width,
        height: args.height,
        fill_probability: args.fill,
        total_iterations: args.iterations,
        big_area_cutoff: args.cutoff,
    };

    let grid = generate_cave(config, args.seed)?;

    if args.json {
        println!("{}", serde_json::to_string(&grid)?);
        return Ok(());
    }

    print!("{}", render_ascii(&grid));
    println!(
        "{} walkable cells in {} region(s), seed {}",
        grid.walkable_positions().len(),
        analyze_regions(&grid).len(),
        args.seed
    );
    Ok(())
}

fn render_ascii(grid: &Grid) -> String {
    let mut out = String::new();
    for y in 0..grid.height as i32 {
        for x in 0..grid.width as i32 {
            out.push(if grid.is_walkable(Pos { y, x }) { '.' } else { '#' });
        }
        out.push('\n');
    }
    out
}
