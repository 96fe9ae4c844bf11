use super::domain::Mark;

/// Presentation-only grade band derived from a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GradeBand {
    F,
    P,
    C,
    D,
    HD,
}

const THRESHOLDS: [(i64, GradeBand); 4] = [
    (85, GradeBand::HD),
    (75, GradeBand::D),
    (65, GradeBand::C),
    (50, GradeBand::P),
];

impl GradeBand {
    /// Classify any score, scanning thresholds from the highest band down.
    ///
    /// Scores below zero land in `F` and scores above one hundred in `HD`.
    pub fn for_score(score: i64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(GradeBand::F)
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeBand::HD => "HD",
            GradeBand::D => "D",
            GradeBand::C => "C",
            GradeBand::P => "P",
            GradeBand::F => "F",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GradeBand::HD => "High Distinction",
            GradeBand::D => "Distinction",
            GradeBand::C => "Credit",
            GradeBand::P => "Pass",
            GradeBand::F => "Fail",
        }
    }
}

pub fn classify_grade(mark: Mark) -> GradeBand {
    GradeBand::for_score(i64::from(mark.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(value: i64) -> Mark {
        Mark::new(value).expect("mark in range")
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(classify_grade(mark(85)), GradeBand::HD);
        assert_eq!(classify_grade(mark(84)), GradeBand::D);
        assert_eq!(classify_grade(mark(75)), GradeBand::D);
        assert_eq!(classify_grade(mark(74)), GradeBand::C);
        assert_eq!(classify_grade(mark(65)), GradeBand::C);
        assert_eq!(classify_grade(mark(64)), GradeBand::P);
        assert_eq!(classify_grade(mark(50)), GradeBand::P);
        assert_eq!(classify_grade(mark(49)), GradeBand::F);
    }

    #[test]
    fn extremes_of_the_range() {
        assert_eq!(classify_grade(Mark::MIN), GradeBand::F);
        assert_eq!(classify_grade(Mark::MAX), GradeBand::HD);
    }

    #[test]
    fn out_of_range_scores_saturate() {
        assert_eq!(GradeBand::for_score(-20), GradeBand::F);
        assert_eq!(GradeBand::for_score(140), GradeBand::HD);
    }

    #[test]
    fn bands_are_monotonic_in_the_mark() {
        let mut previous = GradeBand::F;
        for value in 0..=100 {
            let band = classify_grade(mark(value));
            assert!(band >= previous, "band dropped at {value}");
            previous = band;
        }
    }
}
