use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};

use prereq::course::{course_set, Prereq};
use prereq::loader::load_file;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let expr = args
        .next()
        .ok_or_else(|| anyhow!("usage: pq <prereq-string> [prune-file] [taken-file]"))?;
    let prune_path = args.next();
    let taken_path = args.next();

    let prune = course_set(&load_file(prune_path.as_deref().map(Path::new))?)?;
    let taken = course_set(&load_file(taken_path.as_deref().map(Path::new))?)?;

    let tree = Prereq::parse(&expr, &prune)?;
    println!("{}", tree);
    println!(
        "You can{} take the class",
        if tree.valid(&taken) { "" } else { "not" }
    );
    Ok(())
}
