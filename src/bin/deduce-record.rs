use clue_deduce::{
  core::{Cell, Location},
  deduce::{Engine, Outcome},
  record::GameRecord,
};
use std::{env, fs, process};
use tracing_subscriber::EnvFilter;

/// Replays a JSON game record and reports what it implies about the
/// envelope.  Set `RUST_LOG=clue_deduce=debug` to watch the rules fire.
fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();
  let args: Vec<String> = env::args().collect();
  assert_eq!(2, args.len(), "usage: {} <record.json>", args[0]);
  let json = fs::read_to_string(&args[1])
    .unwrap_or_else(|e| panic!("can't read `{}`: {}", args[1], e));
  let record = GameRecord::from_json(&json).unwrap_or_else(|e| panic!("bad record: {}", e));

  match record.replay(&mut Engine::new()) {
    Ok((_, Outcome::Solved { envelope })) => {
      let ids: Vec<String> = envelope.iter().map(|card| card.get().to_string()).collect();
      println!("envelope: {}", ids.join(" "));
    }
    Ok((tableau, Outcome::Undetermined { unknown_cells })) => {
      println!("undetermined: {} unknown cells", unknown_cells);
      for category in tableau.setup().catalog().categories() {
        let candidates: Vec<String> = tableau
          .setup()
          .catalog()
          .members(category)
          .iter()
          .filter(|&&card| tableau.cell(Location::Envelope, card).is_ok_and(Cell::is_open))
          .map(|card| card.get().to_string())
          .collect();
        println!("{}: {}", category, candidates.join(" "));
      }
    }
    Err(e) => {
      eprintln!("{}", e);
      process::exit(1);
    }
  }
}
