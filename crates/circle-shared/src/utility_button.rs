//! Floating action button whose options fan out over a quarter circle.

use std::f64::consts::FRAC_PI_2;

use serde::Serialize;

use crate::constants::{UTILITY_BUTTON_SIZE, UTILITY_BUTTON_SPACING, UTILITY_STAGGER_SECS};
use crate::types::Placement;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum UtilityAction {
    UploadFile,
    Filter,
    AddIntegration,
    AddConnection,
}

impl UtilityAction {
    pub const ALL: [UtilityAction; 4] = [
        Self::UploadFile,
        Self::Filter,
        Self::AddIntegration,
        Self::AddConnection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UploadFile => "Upload File",
            Self::Filter => "Filter",
            Self::AddIntegration => "Add Integration",
            Self::AddConnection => "Add Connection",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct OptionPlacement {
    pub action: UtilityAction,
    pub placement: Placement,
    pub delay_secs: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UtilityButton {
    is_expanded: bool,
}

impl UtilityButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn toggle(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    pub fn layout(&self) -> Vec<OptionPlacement> {
        let total = UtilityAction::ALL.len();
        UtilityAction::ALL
            .iter()
            .enumerate()
            .map(|(index, &action)| {
                if self.is_expanded {
                    OptionPlacement {
                        action,
                        placement: fanned(index, total),
                        delay_secs: index as f64 * UTILITY_STAGGER_SECS,
                    }
                } else {
                    OptionPlacement {
                        action,
                        placement: Placement {
                            scale: 0.0,
                            opacity: 0.0,
                            ..Placement::default()
                        },
                        delay_secs: 0.0,
                    }
                }
            })
            .collect()
    }
}

/// Position of option `index` of `total` on the arc above and left of the
/// main button.
pub fn fanned(index: usize, total: usize) -> Placement {
    let size = UTILITY_BUTTON_SIZE;
    let steps = total.saturating_sub(1).max(1) as f64;
    let radius = (size + UTILITY_BUTTON_SPACING) * (total as f64 - 1.0) / 2.0 + size / 2.0;
    let angle = FRAC_PI_2 * (index as f64 / steps);

    Placement {
        x: -angle.sin() * radius - size / 2.0,
        y: -angle.cos() * radius - size / 2.0,
        ..Placement::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_options_are_hidden() {
        let button = UtilityButton::new();
        assert!(button
            .layout()
            .iter()
            .all(|o| o.placement.opacity == 0.0 && o.placement.scale == 0.0));
    }

    #[test]
    fn expanded_options_span_quarter_circle() {
        let mut button = UtilityButton::new();
        button.toggle();
        let layout = button.layout();
        assert_eq!(layout.len(), 4);

        // radius = 60 * 3 / 2 + 24 = 114
        let first = layout[0].placement;
        assert!((first.x - -24.0).abs() < 1e-9);
        assert!((first.y - -138.0).abs() < 1e-9);

        let last = layout[3].placement;
        assert!((last.x - -138.0).abs() < 1e-9);
        assert!((last.y - -24.0).abs() < 1e-9);

        assert!((layout[3].delay_secs - 0.15).abs() < 1e-9);
        assert_eq!(layout[3].action.label(), "Add Connection");
    }
}
