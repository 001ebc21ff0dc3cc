//! Ad-hoc matching probe: score a raw counselor name against the roster in
//! an existing database and print the ranked candidates.
//!
//! Usage: mbc-match <db-path> <raw name>

use std::process::ExitCode;

use mbc_match::db::MatchDb;
use mbc_match::engine::{self, DEFAULT_MIN_CONFIDENCE};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [db_path, raw_name] = args.as_slice() else {
        eprintln!("Usage: mbc-match <db-path> <raw name>");
        return ExitCode::from(2);
    };

    match run(db_path, raw_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: &str, raw_name: &str) -> Result<(), mbc_match::db::DbError> {
    let db = MatchDb::open_at(db_path)?;
    let adults = db.get_adults()?;
    let candidates = engine::find_matches(raw_name, &adults, DEFAULT_MIN_CONFIDENCE);

    println!("'{raw_name}' against {} roster adult(s):", adults.len());
    if candidates.is_empty() {
        println!("  no candidates at or above {DEFAULT_MIN_CONFIDENCE:.2}");
        return Ok(());
    }
    for (rank, c) in candidates.iter().enumerate() {
        println!(
            "  {:>2}. {:<30} {:.2}  {:<9} (adult {})",
            rank + 1,
            c.name,
            c.confidence,
            c.tier.as_str(),
            c.adult_id
        );
    }
    Ok(())
}
