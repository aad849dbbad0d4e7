use chrono::{Datelike, Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const PUNS: [&str; 10] = [
    "I'm very a-chord-ing to your needs.",
    "Let's resolve this - no more sus-pense.",
    "I can C# that you're ready to learn.",
    "Don't fret - your theory will scale up.",
    "I'll be brief... like a rest.",
    "We'll stay major, even in minor setbacks.",
    "Let's triad our best today.",
    "This will be note-worthy.",
    "Time to face the music... theory!",
    "I'm key to your success.",
];

/// Pun for a calendar date; every caller on the same date gets the same one.
pub fn pun_of_the_day(date: NaiveDate) -> &'static str {
    let ordinal = date.num_days_from_ce().max(0) as u64;
    let mut rng = StdRng::seed_from_u64(ordinal);
    PUNS.choose(&mut rng).copied().unwrap_or(PUNS[0])
}

pub fn todays_pun() -> &'static str {
    pun_of_the_day(Local::now().date_naive())
}
