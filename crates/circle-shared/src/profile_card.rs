//! Layout of a single friend card.

use serde::Serialize;

use crate::constants::{RAISED_Z_INDEX, TILE_SPRING_DAMPING, TILE_SPRING_STIFFNESS};
use crate::types::{ItemIcon, Placement, Profile, SharedItem, Spring};

pub const TILE_SPRING: Spring = Spring {
    stiffness: TILE_SPRING_STIFFNESS,
    damping: TILE_SPRING_DAMPING,
};

/// A shared item plus where its tile rests inside the card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SharedTile<'a> {
    pub item: &'a SharedItem,
    pub icon: ItemIcon,
    pub placement: Placement,
}

/// Everything the renderer needs to draw one card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileCard<'a> {
    pub name: &'a str,
    pub avatar: &'a str,
    pub initials: String,
    pub tags: &'a [String],
    pub tiles: Vec<SharedTile<'a>>,
    pub blurred: bool,
}

impl<'a> ProfileCard<'a> {
    pub fn new(profile: &'a Profile, is_active: bool) -> Self {
        let tiles = profile
            .shared_items
            .iter()
            .enumerate()
            .map(|(i, item)| SharedTile {
                item,
                icon: item.icon,
                placement: tile_placement(i),
            })
            .collect();

        Self {
            name: &profile.name,
            avatar: &profile.avatar,
            initials: profile.initials(),
            tags: &profile.tags,
            tiles,
            blurred: !is_active,
        }
    }
}

/// Resting placement of the `index`-th shared item: each tile is fanned a
/// little further right, down and clockwise than the previous one.
pub fn tile_placement(index: usize) -> Placement {
    let i = index as f64;
    Placement {
        x: i * 15.0,
        y: i * 10.0,
        rotate: i * 5.0 - 5.0,
        ..Placement::default()
    }
}

/// Placement of a hovered tile: straightened, enlarged and raised.
pub fn tile_hover(index: usize) -> Placement {
    Placement {
        rotate: 0.0,
        scale: 1.1,
        z_index: RAISED_Z_INDEX,
        ..tile_placement(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn tiles_fan_out() {
        let friends = fixtures::friends();
        let card = ProfileCard::new(&friends[0], true);

        assert_eq!(card.initials, "AJ");
        assert!(!card.blurred);
        assert_eq!(card.tiles.len(), 3);

        let rotations: Vec<f64> = card.tiles.iter().map(|t| t.placement.rotate).collect();
        assert_eq!(rotations, vec![-5.0, 0.0, 5.0]);
        assert_eq!(card.tiles[2].placement.x, 30.0);
        assert_eq!(card.tiles[2].placement.y, 20.0);
    }

    #[test]
    fn hover_straightens_tile() {
        let p = tile_hover(2);
        assert_eq!(p.rotate, 0.0);
        assert_eq!(p.scale, 1.1);
        assert_eq!(p.z_index, 10);
        assert_eq!(p.x, 30.0);
    }

    #[test]
    fn inactive_card_is_blurred() {
        let friends = fixtures::friends();
        assert!(ProfileCard::new(&friends[1], false).blurred);
    }
}
