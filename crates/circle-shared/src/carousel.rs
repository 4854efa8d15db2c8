//! Friend carousel view model.
//!
//! The carousel owns a non-empty list of profiles and the index of the card
//! currently centred. Every other card is placed purely as a function of its
//! signed circular distance ("factor") from the active card, so the layout
//! never needs to remember where a card was before.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ViewError;
use crate::types::{Placement, Profile, Spring};

/// Direction of the most recent navigation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Self::Backward => -1,
            Self::None => 0,
            Self::Forward => 1,
        }
    }
}

/// Keys the carousel listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Where one card sits and whether it is the focused one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CardPlacement {
    pub index: usize,
    pub is_active: bool,
    /// Inactive cards are drawn slightly blurred.
    pub blurred: bool,
    /// `x` is a percentage of the card width.
    pub placement: Placement,
}

/// Timing of carousel animations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CarouselTransition {
    pub slide: Spring,
    pub fade_secs: f64,
    pub scale_secs: f64,
}

pub const CAROUSEL_TRANSITION: CarouselTransition = CarouselTransition {
    slide: Spring {
        stiffness: CAROUSEL_SPRING_STIFFNESS,
        damping: CAROUSEL_SPRING_DAMPING,
    },
    fade_secs: CAROUSEL_FADE_SECS,
    scale_secs: CAROUSEL_FADE_SECS,
};

#[derive(Debug, Clone)]
pub struct Carousel {
    profiles: Vec<Profile>,
    active_index: usize,
    direction: Direction,
}

impl Carousel {
    pub fn new(profiles: Vec<Profile>) -> Result<Self, ViewError> {
        if profiles.is_empty() {
            return Err(ViewError::EmptyCarousel);
        }
        Ok(Self {
            profiles,
            active_index: 0,
            direction: Direction::None,
        })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &Profile {
        &self.profiles[self.active_index]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next(&mut self) {
        self.direction = Direction::Forward;
        self.active_index = (self.active_index + 1) % self.len();
    }

    pub fn previous(&mut self) {
        self.direction = Direction::Backward;
        self.active_index = (self.active_index + self.len() - 1) % self.len();
    }

    /// Apply a key press. Returns `false` when the key is not bound.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.previous(),
            Key::Other => return false,
        }
        true
    }

    /// Signed circular distance from the active card to `index`.
    ///
    /// Offsets past the halfway point wrap to the negative side, so with five
    /// cards the factors are `0, 1, 2, -2, -1` around the active one.
    pub fn factor(&self, index: usize) -> i32 {
        circular_factor(index, self.active_index, self.len())
    }

    pub fn placement(&self, index: usize) -> CardPlacement {
        let n = self.len() as i32;
        let is_active = index == self.active_index;
        let distance = f64::from(self.factor(index).abs());

        let placement = if is_active {
            Placement {
                z_index: n,
                ..Placement::default()
            }
        } else {
            Placement {
                x: f64::from(self.factor(index)) * CAROUSEL_STEP_PERCENT,
                opacity: (1.0 - distance * CAROUSEL_OPACITY_STEP).max(CAROUSEL_MIN_OPACITY),
                scale: (1.0 - distance * CAROUSEL_SCALE_STEP).max(CAROUSEL_MIN_SCALE),
                z_index: n - self.factor(index).abs(),
                ..Placement::default()
            }
        };

        CardPlacement {
            index,
            is_active,
            blurred: !is_active,
            placement,
        }
    }

    /// Placements for every card, in list order.
    pub fn layout(&self) -> Vec<CardPlacement> {
        (0..self.len()).map(|i| self.placement(i)).collect()
    }

    /// Starting point of a card sliding in after the last navigation.
    pub fn enter_placement(&self) -> Placement {
        let x = if self.direction.sign() > 0 {
            CAROUSEL_OFFSCREEN_PERCENT
        } else {
            -CAROUSEL_OFFSCREEN_PERCENT
        };
        offscreen(x)
    }

    /// End point of a card sliding out after the last navigation.
    pub fn exit_placement(&self) -> Placement {
        let x = if self.direction.sign() < 0 {
            CAROUSEL_OFFSCREEN_PERCENT
        } else {
            -CAROUSEL_OFFSCREEN_PERCENT
        };
        offscreen(x)
    }
}

fn offscreen(x: f64) -> Placement {
    Placement {
        x,
        opacity: 0.0,
        scale: CAROUSEL_MIN_SCALE,
        z_index: 0,
        ..Placement::default()
    }
}

pub fn circular_factor(index: usize, active: usize, len: usize) -> i32 {
    if len == 0 {
        return 0;
    }
    let offset = ((index + len - active % len) % len) as i32;
    let n = len as i32;
    // compare against n / 2 as a real number: with n = 4, offset 2 stays positive
    if 2 * offset > n {
        offset - n
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn carousel(n: usize) -> Carousel {
        let profiles = fixtures::friends().into_iter().cycle().take(n).collect();
        Carousel::new(profiles).unwrap()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(Carousel::new(vec![]).unwrap_err(), ViewError::EmptyCarousel);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        for n in 1..=9 {
            let mut c = carousel(n);
            c.next();
            let start = c.active_index();
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.active_index(), start, "n = {n}");
        }
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut c = carousel(5);
        c.previous();
        assert_eq!(c.active_index(), 4);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn single_card_stays_put() {
        let mut c = carousel(1);
        c.next();
        c.previous();
        assert_eq!(c.active_index(), 0);
        assert!(c.placement(0).is_active);
    }

    #[test]
    fn keys_drive_navigation() {
        let mut c = carousel(5);
        assert!(c.handle_key(Key::from_name("ArrowRight")));
        assert_eq!(c.active_index(), 1);
        assert!(c.handle_key(Key::ArrowLeft));
        assert!(c.handle_key(Key::ArrowLeft));
        assert_eq!(c.active_index(), 4);
        assert!(!c.handle_key(Key::from_name("Enter")));
        assert_eq!(c.active_index(), 4);
    }

    #[test]
    fn factors_wrap_around_active() {
        let c = carousel(5);
        let factors: Vec<i32> = (0..5).map(|i| c.factor(i)).collect();
        assert_eq!(factors, vec![0, 1, 2, -2, -1]);

        // even length: the card exactly opposite stays on the positive side
        let c = carousel(4);
        let factors: Vec<i32> = (0..4).map(|i| c.factor(i)).collect();
        assert_eq!(factors, vec![0, 1, 2, -1]);
    }

    #[test]
    fn placement_follows_distance() {
        let mut c = carousel(5);
        c.next();

        let active = c.placement(1);
        assert!(active.is_active);
        assert!(!active.blurred);
        assert_eq!(active.placement.x, 0.0);
        assert_eq!(active.placement.z_index, 5);

        let right = c.placement(2).placement;
        assert_eq!(right.x, 110.0);
        assert!((right.opacity - 0.7).abs() < 1e-9);
        assert!((right.scale - 0.9).abs() < 1e-9);
        assert_eq!(right.z_index, 4);

        let far_left = c.placement(4).placement;
        assert_eq!(far_left.x, -220.0);
        assert!((far_left.opacity - 0.4).abs() < 1e-9);
        assert!((far_left.scale - 0.8).abs() < 1e-9);
        assert_eq!(far_left.z_index, 3);
    }

    #[test]
    fn opacity_and_scale_are_clamped() {
        let c = carousel(9);
        let p = c.placement(4).placement;
        assert_eq!(c.factor(4), 4);
        assert_eq!(p.opacity, CAROUSEL_MIN_OPACITY);
        assert_eq!(p.scale, CAROUSEL_MIN_SCALE);
    }

    #[test]
    fn enter_and_exit_follow_direction() {
        let mut c = carousel(3);
        c.next();
        assert_eq!(c.enter_placement().x, 100.0);
        assert_eq!(c.exit_placement().x, -100.0);

        c.previous();
        assert_eq!(c.enter_placement().x, -100.0);
        assert_eq!(c.exit_placement().x, 100.0);
        assert_eq!(c.exit_placement().opacity, 0.0);
    }
}
