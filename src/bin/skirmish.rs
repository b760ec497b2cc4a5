//! Seeded demo skirmish
//!
//! Runs a handful of resolutions with a fixed seed and prints their
//! logs. Same seed, same fight.

use clap::Parser;

use fusillade::core::dice::Dice;
use fusillade::model::character::Character;
use fusillade::model::equipment::{AmmoType, Grenade, Weapon};
use fusillade::model::shot::{ExplosiveTarget, ShotParameters, TargetExposure};
use fusillade::modes;

#[derive(Parser)]
#[command(name = "skirmish", about = "Run a seeded demo firefight")]
struct Args {
    /// Seed for the dice; the same seed replays the same fight.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log engine internals as well as resolution output.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if args.verbose {
                    tracing::Level::DEBUG
                } else {
                    tracing::Level::INFO
                }
                .into(),
            ),
        )
        .init();

    tracing::info!(seed = args.seed, "starting skirmish");
    let mut dice = Dice::seeded(args.seed);

    let shooter = Character::test_rifleman();
    let rifle = Weapon::assault_rifle();
    let ball = AmmoType::rifle_ball();

    // An aimed shot at a kneeling defender.
    let mut defender = Character::test_conscript();
    let mut params = ShotParameters::aimed(100, 3);
    params.exposure = TargetExposure::Kneeling;
    match modes::single_shot(&shooter, &rifle, &ball, &mut defender, &params, &mut dice) {
        Ok(result) => println!("{}\n", result.log),
        Err(e) => eprintln!("single shot failed: {e}"),
    }

    // A burst walked across two runners.
    let mut first = Character::test_conscript();
    first.name = "First Runner".into();
    let mut second = Character::test_conscript();
    second.name = "Second Runner".into();
    let mut run = ShotParameters::aimed(50, 2);
    run.target_speed = 3;
    let burst_params = vec![run.clone(), run];
    let mut targets: Vec<&mut Character> = vec![&mut first, &mut second];
    match modes::burst_fire(
        &shooter,
        &rifle,
        &ball,
        &mut targets,
        &burst_params,
        None,
        0,
        &mut dice,
    ) {
        Ok(result) => println!("{}\n", result.log),
        Err(e) => eprintln!("burst failed: {e}"),
    }

    // A grenade over the wall, then its burst against whoever is close.
    let grenade = Grenade::fragmentation();
    let throw = ShotParameters::aimed(12, 2);
    match modes::grenade_throw(&shooter, &grenade, ExplosiveTarget::Area, &throw, &mut dice) {
        Ok((result, log)) => {
            println!("{log}\n");
            let mut bystander = Character::test_conscript();
            bystander.name = "Bystander".into();
            let distance = if result.hit { 1 } else { result.scatter_hexes + 1 };
            let mut caught = [modes::ExplosionTarget {
                character: &mut bystander,
                range: distance,
                orientation: fusillade::model::shot::Orientation::Front,
                exposure: TargetExposure::Standing,
                blast_modifiers: Vec::new(),
            }];
            match modes::explosion_damage(&grenade.explosive, &mut caught, &mut dice) {
                Ok(burst) => println!("{}", burst.log),
                Err(e) => eprintln!("explosion failed: {e}"),
            }
        }
        Err(e) => eprintln!("throw failed: {e}"),
    }
}
