//! Generic rejection sampling with a bounded attempt budget.
//!
//! Obstacles and grass share this loop. They differ only in how candidates are
//! generated and how much clearance a candidate has: a non-negative clearance
//! accepts it, a negative one is the distance it is short by.

use rand::Rng;

use crate::warnings::SceneWarning;

/// Upper bound on the up-front allocation; larger runs grow as they accept.
const PREALLOCATE_LIMIT: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBudget {
    /// Hard cap on generated candidates across the whole run.
    pub max_attempts: usize,
    /// When set, a slot that fails this many times keeps its best candidate
    /// anyway instead of consuming more of the budget.
    pub per_item_retries: Option<usize>,
}

impl SampleBudget {
    /// Stop when `max_attempts` candidates have been tried.
    pub fn total(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            per_item_retries: None,
        }
    }

    /// Every slot gets `retries` tries, then its best-effort candidate.
    pub fn relaxed(count: usize, retries: usize) -> Self {
        let retries = retries.max(1);
        Self {
            max_attempts: count.saturating_mul(retries),
            per_item_retries: Some(retries),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sampled<T> {
    pub items: Vec<T>,
    pub requested: usize,
    pub attempts: usize,
    /// Items accepted without meeting their clearance.
    pub relaxed: usize,
}

impl<T> Sampled<T> {
    pub fn is_complete(&self) -> bool {
        self.items.len() >= self.requested
    }

    pub fn underflow(&self, what: &'static str) -> Option<SceneWarning> {
        (!self.is_complete()).then(|| SceneWarning::PlacementUnderflow {
            what,
            requested: self.requested,
            placed: self.items.len(),
        })
    }
}

fn initial_capacity(count: usize, budget: SampleBudget) -> usize {
    count.min(budget.max_attempts).min(PREALLOCATE_LIMIT)
}

/// Place up to `count` items.
///
/// `generate(rng, slot)` builds a candidate for the next free slot.
/// `clearance(candidate, accepted)` scores it against what is already placed.
/// Always terminates within `budget.max_attempts` candidates.
pub fn rejection_sample<T, R, G, C>(
    rng: &mut R,
    count: usize,
    budget: SampleBudget,
    mut generate: G,
    mut clearance: C,
) -> Sampled<T>
where
    R: Rng + ?Sized,
    G: FnMut(&mut R, usize) -> T,
    C: FnMut(&T, &[T]) -> f32,
{
    let retries = budget.per_item_retries.map(|n| n.max(1));
    let mut items: Vec<T> = Vec::with_capacity(initial_capacity(count, budget));
    let mut attempts = 0;
    let mut relaxed = 0;

    'slots: while items.len() < count {
        let slot = items.len();
        let mut best: Option<(T, f32)> = None;
        let mut tries = 0;

        loop {
            if attempts >= budget.max_attempts {
                break 'slots;
            }
            attempts += 1;
            tries += 1;

            let candidate = generate(rng, slot);
            let slack = clearance(&candidate, &items);
            if slack >= 0.0 {
                items.push(candidate);
                continue 'slots;
            }

            let Some(limit) = retries else {
                continue;
            };
            if best.as_ref().map_or(true, |(_, s)| slack > *s) {
                best = Some((candidate, slack));
            }
            if tries >= limit {
                if let Some((candidate, _)) = best.take() {
                    items.push(candidate);
                    relaxed += 1;
                }
                continue 'slots;
            }
        }
    }

    Sampled {
        items,
        requested: count,
        attempts,
        relaxed,
    }
}
