use std::time::Instant;

use montecarlo::defs::d6;
use montecarlo::{Analyzer, Game};

fn main() -> montecarlo::Result<()> {
    let loaded = d6();
    loaded.change_weight(&6, 5.0)?;
    println!("{}", loaded.show_state());

    let mut game = Game::new([d6(), d6(), loaded])?;

    let start = Instant::now();
    game.play(10_000)?;
    let elapsed = (Instant::now() - start).as_millis();

    let analyzer = Analyzer::new(&game);
    println!("jackpots = {} elapsed = {elapsed}ms", analyzer.jackpot());

    let combos = analyzer.combo_count();
    println!("distinct combinations = {}", combos.len());
    for (combo, count) in combos.iter().take(5) {
        println!("  {combo}: {count}");
    }

    let perms = analyzer.distinct_permutations();
    println!("distinct permutations = {}", perms.len());

    game.play(5)?;
    print!("{}", game.wide());
    print!("{}", Analyzer::new(&game).face_counts_per_roll());
    Ok(())
}
