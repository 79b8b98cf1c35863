//! Final-score rank evaluation
//!
//! Pure threshold table, no side effects.

/// A cosmetic tier derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub emoji: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Map a final score to its tier
pub fn rank_for_score(score: u32) -> Rank {
    if score >= 150 {
        Rank {
            emoji: "👑",
            label: "REINE DE MON CŒUR",
            color: "#ffd700",
        }
    } else if score >= 100 {
        Rank {
            emoji: "💎",
            label: "DIAMANT",
            color: "#b9f2ff",
        }
    } else if score >= 70 {
        Rank {
            emoji: "🌟",
            label: "SUPERSTAR",
            color: "#ffd700",
        }
    } else if score >= 40 {
        Rank {
            emoji: "⭐",
            label: "CHAMPION",
            color: "#ff69b4",
        }
    } else {
        Rank {
            emoji: "❤️",
            label: "MON AMOUR",
            color: "#ff6b9d",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(rank_for_score(150).label, "REINE DE MON CŒUR");
        assert_eq!(rank_for_score(149).label, "DIAMANT");
        assert_eq!(rank_for_score(100).label, "DIAMANT");
        assert_eq!(rank_for_score(99).label, "SUPERSTAR");
        assert_eq!(rank_for_score(70).label, "SUPERSTAR");
        assert_eq!(rank_for_score(69).label, "CHAMPION");
        assert_eq!(rank_for_score(40).label, "CHAMPION");
        assert_eq!(rank_for_score(39).label, "MON AMOUR");
        assert_eq!(rank_for_score(0).label, "MON AMOUR");
    }

    #[test]
    fn test_top_rank_unbounded() {
        assert_eq!(rank_for_score(9999).label, "REINE DE MON CŒUR");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn tier(score: u32) -> u32 {
            match rank_for_score(score).label {
                "MON AMOUR" => 0,
                "CHAMPION" => 1,
                "SUPERSTAR" => 2,
                "DIAMANT" => 3,
                _ => 4,
            }
        }

        proptest! {
            /// A higher score never earns a lower tier
            #[test]
            fn tier_is_monotonic(a in 0u32..400, b in 0u32..400) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(tier(lo) <= tier(hi));
            }
        }
    }
}
