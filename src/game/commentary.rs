//! Play-by-play flavor text
//!
//! Purely cosmetic: each category holds a handful of lines and one is picked
//! at random every time.

use crate::core::Score;
use rand::Rng;
use rand::seq::IndexedRandom;

const READY: &[&str] = &["Step up to the plate!"];

const HOMERUN: &[&str] = &[
    "HOME RUN! It's over the fence! A perfect hit to end the game!",
    "A thrilling walk-off home run! Victory is yours!",
    "A three-run blast! You've completely demolished the pitcher!",
    "Today's highlight, right here! A fantastic home run!",
    "Accurate analysis, bold prediction! That's pure skill!",
];

const HIT_ONE: &[&str] = &[
    "Nice hit! You got one right!",
    "One down, but a ways to go. Look forward to the next at-bat!",
    "A hit! You've got a good clue.",
    "A crucial hit at a key moment! Stay calm and aim for the next one.",
];

const HIT_TWO: &[&str] = &[
    "Multi-hit! Two numbers are in the exact right place!",
    "Fantastic swing! Almost a perfect hit!",
    "Two precise hits! Are you aiming for a home run next?",
    "The pitcher is starting to waver! This is your chance to push!",
];

const FOUL_ONE: &[&str] = &[
    "So close! One number was a match, but not in the right spot!",
    "You found one number, but not its position. A little more focus!",
    "The direction was right, but it needed a bit more power! Let's try again!",
];

const FOUL_TWO: &[&str] = &[
    "Two fouls! Two numbers are correct but misplaced. Very close!",
    "You see two of the numbers, but they're not in their spots! Try a new combination!",
    "The pitcher's throw was clever. You caught two numbers, but their positions are off!",
];

const FOUL_THREE: &[&str] = &[
    "Three fouls! All three numbers are right but every one is out of place!",
    "All three numbers are there, hiding! Re-arrange your strategy!",
    "The pitcher is expertly dodging your hits! The numbers are right, the spots are not!",
];

const STRIKE: &[&str] = &[
    "Strike! That swing completely missed!",
    "Unfortunately, you didn't hit anything. Aim for the next chance!",
    "The pitcher's experience shines through! Choose the next pitch carefully.",
    "This at-bat ends in vain. Regroup for the next opportunity!",
];

const STRIKEOUT: &[&str] = &[
    "Strikeout! No home run in 9 innings. The game is over.",
    "Game over! Hope for a better result next time, and challenge again!",
    "That's all for today's game. Prepare for the next match!",
];

const HINT: &[&str] = &[
    "Here's the report from the analyst! The number '{hint}' is not in the secret code.",
    "Good info! Think with the number '{hint}' excluded.",
    "A sign from the manager! '{hint}' is a discard.",
];

const RESULT: &[&str] = &["{hits} Hits, {fouls} Fouls! Nice try!"];

const NOT_ENOUGH_WGT: &[&str] = &["Not enough WGT!"];

const NO_MORE_HINTS: &[&str] = &["No more hints can be used in this game."];

const NEED_THREE: &[&str] = &["You must select 3 numbers!"];

/// Something worth commenting on that is not a scored swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remark {
    Ready,
    Strikeout,
    HintRevealed(u8),
    NotEnoughWgt,
    NoMoreHints,
    NeedThreeDigits,
}

pub struct CommentaryPicker;

impl CommentaryPicker {
    /// Commentary for a scored swing
    ///
    /// Priority: homerun, strike, hits, fouls, then a generic tally.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use wld_baseball::core::Score;
    /// use wld_baseball::game::CommentaryPicker;
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let line = CommentaryPicker::pick(Score::HOMERUN, &mut rng);
    /// assert!(!line.is_empty());
    /// ```
    pub fn pick<R: Rng + ?Sized>(score: Score, rng: &mut R) -> String {
        let lines = if score.is_homerun() {
            HOMERUN
        } else if score.strikes > 0 {
            STRIKE
        } else if score.hits > 0 {
            if score.hits >= 2 { HIT_TWO } else { HIT_ONE }
        } else if score.fouls > 0 {
            match score.fouls {
                1 => FOUL_ONE,
                2 => FOUL_TWO,
                _ => FOUL_THREE,
            }
        } else {
            RESULT
        };

        choose(lines, rng)
            .replace("{hits}", &score.hits.to_string())
            .replace("{fouls}", &score.fouls.to_string())
    }

    /// Commentary for everything that is not a swing
    pub fn remark<R: Rng + ?Sized>(remark: Remark, rng: &mut R) -> String {
        match remark {
            Remark::Ready => choose(READY, rng).to_string(),
            Remark::Strikeout => choose(STRIKEOUT, rng).to_string(),
            Remark::HintRevealed(digit) => choose(HINT, rng).replace("{hint}", &digit.to_string()),
            Remark::NotEnoughWgt => choose(NOT_ENOUGH_WGT, rng).to_string(),
            Remark::NoMoreHints => choose(NO_MORE_HINTS, rng).to_string(),
            Remark::NeedThreeDigits => choose(NEED_THREE, rng).to_string(),
        }
    }
}

fn choose<R: Rng + ?Sized>(lines: &'static [&'static str], rng: &mut R) -> &'static str {
    lines.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn score(hits: u8, fouls: u8) -> Score {
        Score {
            hits,
            fouls,
            strikes: u8::from(hits == 0 && fouls == 0),
        }
    }

    #[test]
    fn homerun_wins_priority() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let line = CommentaryPicker::pick(Score::HOMERUN, &mut rng);
            assert!(HOMERUN.contains(&line.as_str()));
        }
    }

    #[test]
    fn strike_lines() {
        let mut rng = StdRng::seed_from_u64(1);
        let line = CommentaryPicker::pick(score(0, 0), &mut rng);
        assert!(STRIKE.contains(&line.as_str()));
    }

    #[test]
    fn hits_outrank_fouls() {
        let mut rng = StdRng::seed_from_u64(1);
        let line = CommentaryPicker::pick(score(1, 2), &mut rng);
        assert!(HIT_ONE.contains(&line.as_str()));

        let line = CommentaryPicker::pick(score(2, 0), &mut rng);
        assert!(HIT_TWO.contains(&line.as_str()));
    }

    #[test]
    fn foul_counts_pick_their_category() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(FOUL_ONE.contains(&CommentaryPicker::pick(score(0, 1), &mut rng).as_str()));
        assert!(FOUL_TWO.contains(&CommentaryPicker::pick(score(0, 2), &mut rng).as_str()));
        assert!(FOUL_THREE.contains(&CommentaryPicker::pick(score(0, 3), &mut rng).as_str()));
    }

    #[test]
    fn generic_tally_for_unflagged_empty_score() {
        let mut rng = StdRng::seed_from_u64(1);
        let line = CommentaryPicker::pick(Score::default(), &mut rng);
        assert_eq!(line, "0 Hits, 0 Fouls! Nice try!");
    }

    #[test]
    fn hint_remark_names_the_digit() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let line = CommentaryPicker::remark(Remark::HintRevealed(7), &mut rng);
            assert!(line.contains("'7'"));
            assert!(!line.contains("{hint}"));
        }
    }

    #[test]
    fn fixed_remarks() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            CommentaryPicker::remark(Remark::NotEnoughWgt, &mut rng),
            "Not enough WGT!"
        );
        assert_eq!(
            CommentaryPicker::remark(Remark::Ready, &mut rng),
            "Step up to the plate!"
        );
        assert!(STRIKEOUT.contains(&CommentaryPicker::remark(Remark::Strikeout, &mut rng).as_str()));
    }
}
