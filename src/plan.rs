use itertools::Itertools;

use crate::locale::Locale;

pub const PREPARE_MS: u64 = 20_000;
pub const WORK_MS: u64 = 20_000;
pub const SHORT_REST_MS: u64 = 10_000;
pub const SETS_PER_BLOCK: u32 = 4;

/// Rests strictly longer than this are "long" (inter-block) rests
pub const LONG_REST_THRESHOLD_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StepKind {
    Prepare,
    Work,
    Rest,
}

/// Kind-specific data carried by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMeta {
    None,
    /// 1-indexed set within the block
    Work { set: u32, of: u32 },
    /// Label of whatever follows this rest
    Rest { next: &'static str },
}

/// One timed phase of the workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub label: &'static str,
    pub kind: StepKind,
    pub duration_ms: u64,
    pub meta: StepMeta,
}

impl Step {
    pub fn prepare(label: &'static str, duration_ms: u64) -> Self {
        Self {
            label,
            kind: StepKind::Prepare,
            duration_ms,
            meta: StepMeta::None,
        }
    }

    pub fn work(label: &'static str, duration_ms: u64, set: u32, of: u32) -> Self {
        Self {
            label,
            kind: StepKind::Work,
            duration_ms,
            meta: StepMeta::Work { set, of },
        }
    }

    pub fn rest(label: &'static str, duration_ms: u64, next: &'static str) -> Self {
        Self {
            label,
            kind: StepKind::Rest,
            duration_ms,
            meta: StepMeta::Rest { next },
        }
    }

    pub fn is_long_rest(&self) -> bool {
        self.kind == StepKind::Rest && is_long_rest_ms(self.duration_ms)
    }
}

pub fn is_long_rest_ms(duration_ms: u64) -> bool {
    duration_ms > LONG_REST_THRESHOLD_MS
}

struct Block {
    name: &'static str,
    long_rest_ms: u64,
}

/// Ordered, immutable sequence of steps for one workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
    total_ms: u64,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Step> {
        self.steps.get(idx)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.total_ms
    }

    /// Sum of the durations of the steps from `idx` to the end
    pub fn remaining_from(&self, idx: usize) -> u64 {
        self.steps.iter().skip(idx).map(|s| s.duration_ms).sum()
    }

    /// Fraction of the whole plan already behind us when step `idx` begins
    pub fn elapsed_fraction_at(&self, idx: usize) -> f64 {
        if self.total_ms == 0 {
            return 1.0;
        }
        let elapsed = self.total_ms - self.remaining_from(idx);
        elapsed as f64 / self.total_ms as f64
    }
}

/// Build the fixed workout with the default (Russian) wording
pub fn build_plan() -> Plan {
    build_plan_in(Locale::default())
}

/// Build the fixed workout: one preparation, then three blocks of four work
/// sets separated by short rests, each block closed by a long rest.
pub fn build_plan_in(locale: Locale) -> Plan {
    let s = locale.strings();
    let blocks = [
        Block {
            name: s.blocks[0],
            long_rest_ms: 40_000,
        },
        Block {
            name: s.blocks[1],
            long_rest_ms: 40_000,
        },
        Block {
            name: s.blocks[2],
            long_rest_ms: 180_000,
        },
    ];

    let mut steps = vec![Step::prepare(s.prepare, PREPARE_MS)];

    for (b, block) in blocks.iter().enumerate() {
        let sets = (1..=SETS_PER_BLOCK)
            .map(|set| Step::work(block.name, WORK_MS, set, SETS_PER_BLOCK));
        steps.extend(Itertools::intersperse_with(sets, || {
            Step::rest(s.rest, SHORT_REST_MS, block.name)
        }));

        let long_rest = match blocks.get(b + 1) {
            Some(following) => Step::rest(s.rest, block.long_rest_ms, following.name),
            None => Step::rest(s.cool_down, block.long_rest_ms, s.finish),
        };
        steps.push(long_rest);
    }

    let total_ms = steps.iter().map(|step| step.duration_ms).sum();
    Plan { steps, total_ms }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_TOTAL_MS: u64 =
        20_000 + 3 * (4 * 20_000 + 3 * 10_000) + 40_000 + 40_000 + 180_000;

    #[test]
    fn test_plan_shape() {
        let plan = build_plan();
        assert_eq!(plan.len(), 25);
        assert!(!plan.is_empty());
        assert_eq!(plan.steps()[0].kind, StepKind::Prepare);
        assert_eq!(plan.steps().last().unwrap().kind, StepKind::Rest);
        assert!(plan.steps().iter().all(|s| s.duration_ms > 0));
    }

    #[test]
    fn test_total_duration() {
        let plan = build_plan();
        assert_eq!(EXPECTED_TOTAL_MS, 610_000);
        assert_eq!(plan.total_duration_ms(), EXPECTED_TOTAL_MS);
        assert_eq!(
            plan.total_duration_ms(),
            plan.steps().iter().map(|s| s.duration_ms).sum::<u64>()
        );
    }

    #[test]
    fn test_each_block_has_four_sets_three_short_rests_one_long_rest() {
        let plan = build_plan();
        // skip the preparation step; every block is 8 steps long
        for block in plan.steps()[1..].chunks(8) {
            let works = block.iter().filter(|s| s.kind == StepKind::Work).count();
            let short = block
                .iter()
                .filter(|s| s.kind == StepKind::Rest && !s.is_long_rest())
                .count();
            let long = block.iter().filter(|s| s.is_long_rest()).count();
            assert_eq!((works, short, long), (4, 3, 1));
            assert!(block[7].is_long_rest());

            let sets: Vec<_> = block
                .iter()
                .filter_map(|s| match s.meta {
                    StepMeta::Work { set, of } => Some((set, of)),
                    _ => None,
                })
                .collect();
            assert_eq!(sets, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        }
    }

    #[test]
    fn test_rest_next_labels() {
        let plan = build_plan_in(Locale::Russian);
        let steps = plan.steps();

        assert_eq!(steps[2].meta, StepMeta::Rest { next: "Прыжки" });
        assert_eq!(steps[8].duration_ms, 40_000);
        assert_eq!(steps[8].meta, StepMeta::Rest { next: "Приседания" });
        assert_eq!(steps[16].meta, StepMeta::Rest { next: "Бёрпи" });

        let last = steps.last().unwrap();
        assert_eq!(last.label, "Шавасана");
        assert_eq!(last.duration_ms, 180_000);
        assert_eq!(last.meta, StepMeta::Rest { next: "Завершение" });
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build_plan(), build_plan());
        assert_eq!(build_plan_in(Locale::English), build_plan_in(Locale::English));
    }

    #[test]
    fn test_english_plan_has_same_timing() {
        let ru = build_plan_in(Locale::Russian);
        let en = build_plan_in(Locale::English);
        let ru_durations: Vec<_> = ru.steps().iter().map(|s| (s.kind, s.duration_ms)).collect();
        let en_durations: Vec<_> = en.steps().iter().map(|s| (s.kind, s.duration_ms)).collect();
        assert_eq!(ru_durations, en_durations);
        assert_eq!(en.steps().last().unwrap().label, "Savasana");
    }

    #[test]
    fn test_long_rest_boundary() {
        assert!(!is_long_rest_ms(10_000));
        assert!(is_long_rest_ms(10_001));
        assert!(!Step::rest("r", 10_000, "x").is_long_rest());
        assert!(Step::rest("r", 10_001, "x").is_long_rest());
        // only rests can be long
        assert!(!Step::work("w", 20_000, 1, 4).is_long_rest());
    }

    #[test]
    fn test_elapsed_fraction() {
        let plan = build_plan();
        assert_eq!(plan.elapsed_fraction_at(0), 0.0);
        assert_eq!(plan.remaining_from(plan.len()), 0);

        let last = plan.len() - 1;
        let expected = (610_000 - 180_000) as f64 / 610_000.0;
        assert!((plan.elapsed_fraction_at(last) - expected).abs() < 1e-12);
        assert!(plan.elapsed_fraction_at(last) < 1.0);
    }
}
