use rs_markov_core::{GenerationInput, Generator, MarkovChain, RngSelector, StartState};

const CORPUS: &str = "\
the knight rode to the castle and the dragon slept in the cave \
the dragon woke and the knight drew his sword \
the castle gate opened and the knight rode to the cave";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug (or trace) to follow training and generation
    env_logger::init();

    // Train on an observed activity sequence
    let mut activities = MarkovChain::new();
    activities.train(&["walk", "run", "jump", "walk", "run", "walk", "jump"]);

    // Repeated training accumulates transitions
    activities.train(&["idle", "walk", "idle"]);

    log::info!("activity model:\n{}", activities);

    // Generation with the thread-local random generator
    println!("{:?}", activities.generate("walk", 5)?);

    // Unknown start state: the sequence stops right away
    println!("{:?}", activities.generate("banana", 5)?);

    // Length 0 is a caller error
    match activities.generate("walk", 0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Word-level text generation, one sentence per training call
    let mut text = MarkovChain::new();
    for sentence in CORPUS.split(" the castle gate") {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        text.train(&words);
    }

    // A seeded selector makes generation reproducible
    let mut generator = Generator::new(&text, RngSelector::seeded(42));

    // Start state can be set to
    // 'Custom' to start from a given word
    // 'Random' to start from any trained word
    let mut input = GenerationInput::new(StartState::Custom("the"), 12)?;
    for i in 0..3 {
        println!("Generated sentence {}: {}", i + 1, generator.predict(&input)?.join(" "));
    }

    input.start_state = StartState::Random;
    input.set_length(8)?;
    for i in 0..3 {
        println!("Random start {}: {}", i + 1, generator.predict(&input)?.join(" "));
    }

    Ok(())
}
