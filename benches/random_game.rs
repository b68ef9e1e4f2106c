use ludo_game_types::autoplay::{Autoplay, AutoplayConfig, NullInstruments};
use ludo_game_types::types::VictorDeterminableGame;
use rand::{rngs::SmallRng, SeedableRng};

fn main() {
    tracing_subscriber::fmt::init();

    let config = AutoplayConfig {
        max_turns: 1_000_000,
        ..AutoplayConfig::default()
    };
    let mut rng = SmallRng::from_entropy();
    let mut game = Autoplay::new(&config).unwrap();

    let summary = game.play_to_completion(&mut rng, &NullInstruments).unwrap();
    println!("{}", game.board());
    println!(
        "winner {:?} after {} turns, over: {}",
        summary.winner,
        summary.turns,
        game.board().is_over()
    );
}
