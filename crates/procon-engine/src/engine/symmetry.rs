//! Rotated and mirrored copies of training samples.
//!
//! The board looks the same to the game after a quarter turn or a left-right
//! flip, as long as every directional action id is remapped in lock-step with
//! the planes. Rotations are counter-clockwise (`L -> D -> R -> U -> L`) and
//! Stay is fixed under every transform.

use rand::Rng;

use crate::core::Action;

use super::observation::Planes;

/// Probability (or visit count) of each action id.
pub type ActionProbs = [f32; Action::COUNT];

/// Remaps `probs` so that each entry follows its action through
/// `quarter_turns` counter-clockwise rotations.
#[must_use]
pub fn rotate_probs(probs: &ActionProbs, quarter_turns: u8) -> ActionProbs {
    let mut out = [0.0; Action::COUNT];
    for action in Action::ALL {
        out[action.rotated(quarter_turns).index()] = probs[action.index()];
    }
    out
}

/// The four quarter-turn rotations of a sample, starting with the sample itself.
#[must_use]
pub fn rotations(planes: &Planes, probs: &ActionProbs) -> [(Planes, ActionProbs); 4] {
    [0, 1, 2, 3].map(|k| (planes.rotated(k), rotate_probs(probs, k)))
}

/// An optional left-right flip followed by a number of quarter turns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetryTransform {
    pub mirror: bool,
    pub quarter_turns: u8,
}

impl SymmetryTransform {
    pub const IDENTITY: Self = Self {
        mirror: false,
        quarter_turns: 0,
    };

    /// Mirrors with probability 0.5, then picks one of the four rotations uniformly.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            mirror: rng.random_bool(0.5),
            quarter_turns: rng.random_range(0..4),
        }
    }

    /// The transform that undoes `self`.
    #[must_use]
    pub fn inverse(self) -> Self {
        if self.mirror {
            // a flip turns every rotation around, so flip-then-rotate is its own inverse
            self
        } else {
            Self {
                mirror: false,
                quarter_turns: (4 - self.quarter_turns % 4) % 4,
            }
        }
    }

    #[must_use]
    pub fn apply_planes(self, planes: &Planes) -> Planes {
        if self.mirror {
            planes.mirrored().rotated(self.quarter_turns)
        } else {
            planes.rotated(self.quarter_turns)
        }
    }

    #[must_use]
    pub fn apply_action(self, action: Action) -> Action {
        let action = if self.mirror {
            action.mirrored()
        } else {
            action
        };
        action.rotated(self.quarter_turns)
    }
}

/// A `(state, action, next state)` sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: Planes,
    pub action: Action,
    pub next_state: Planes,
}

impl Transition {
    #[must_use]
    pub fn transformed(&self, transform: SymmetryTransform) -> Self {
        Self {
            state: transform.apply_planes(&self.state),
            action: transform.apply_action(self.action),
            next_state: transform.apply_planes(&self.next_state),
        }
    }

    /// Applies a [`SymmetryTransform::random`] transform drawn from `rng`.
    pub fn random_symmetry<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.transformed(SymmetryTransform::random(rng))
    }
}
