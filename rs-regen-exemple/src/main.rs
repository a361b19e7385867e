use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_regen_core::{generate_batch, Automaton, AutomatonBuilder, AutomatonLibrary, RandomWalker, WalkError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // An automaton compiler would normally produce this: [ab]{4,6}c
    let mut builder = AutomatonBuilder::new();
    let steps: Vec<_> = (0..=6).map(|_| builder.add_state(false)).collect();
    let end = builder.add_state(true);
    for pair in steps.windows(2) {
        builder.add_transition(pair[0], 'a', 'b', pair[1])?;
    }
    for step in &steps[4..] {
        builder.add_char_transition(*step, 'c', end)?;
    }
    let pattern = builder.build()?;

    // Persist the automata in the "data" directory, where the server finds them
    fs::create_dir_all("./data")?;
    pattern.save("./data/pattern.bin")?;
    Automaton::literal("ab").save("./data/literal.bin")?;

    // Load everything back, as the server does at startup
    let library = AutomatonLibrary::new("./data")?;
    println!("Loaded automata: {}", library.names().join(", "));
    let pattern = library.get("pattern").ok_or("pattern automaton not found")?;

    // A fixed seed always gives the same strings
    let mut walker = RandomWalker::with_seed(pattern, 42);
    for i in 0..5 {
        println!("Generated string {}: {}", i + 1, walker.generate());
    }

    // Length-bounded generation can fail; retrying is up to the caller
    for i in 0..5 {
        match walker.generate_bounded(5, 6) {
            Ok(text) => println!("Bounded string {}: {}", i + 1, text),
            Err(e @ (WalkError::InsufficientLength { .. } | WalkError::MaxLengthExceeded { .. })) => {
                println!("Bounded string {} failed, try again: {}", i + 1, e)
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Swapping the random source keeps the automaton but gives new strings
    let previous = walker.set_rng(StdRng::seed_from_u64(7));
    println!("After reseeding: {}", walker.generate());
    walker.set_rng(previous);

    // Literal automata only ever produce themselves
    let literal = library.get("literal").ok_or("literal automaton not found")?;
    match RandomWalker::with_seed(literal, 0).generate_bounded(0, 1) {
        Ok(text) => println!("Should not happen: {}", text),
        Err(e) => println!("'ab' cannot fit in one character: {}", e),
    }

    // Many strings at once, on every core, still reproducible
    let batch = generate_batch(pattern, 8, 2024, None);
    for (i, text) in batch.into_iter().enumerate() {
        println!("Batch string {}: {}", i + 1, text?);
    }

    Ok(())
}
