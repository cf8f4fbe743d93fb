//! Read-only views of the temperature field for drawing
//!
//! This module never modifies simulation state. Renderers call it once per
//! frame with the latest snapshot.

pub mod colors;

use crate::core::types::GridPos;
use crate::simulation::state::{EntityKind, GameState};

pub use colors::{temperature_color, Color, ColorStop, DEFAULT_STOPS};

/// Which fine cells a renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldView {
    /// Every fine cell
    All,
    /// Only cells whose game cell is empty
    Uncovered,
    /// Only cells read by a sensor
    Sensed,
}

/// One visible fine cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCell {
    pub column: usize,
    pub row: usize,
    pub temperature: f64,
    pub color: Color,
}

/// Collects visible field cells into a reusable buffer.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_field_cells(
    state: &GameState,
    resolution: u32,
    view: FieldView,
    stops: &[ColorStop],
    buffer: &mut Vec<FieldCell>,
) {
    buffer.clear();
    let res = resolution.max(1) as usize;

    for (column, row, &temperature) in state.temp.cells() {
        let cell = GridPos::new((column / res) as i32, (row / res) as i32);
        let visible = match view {
            FieldView::All => true,
            FieldView::Uncovered => state.entity_at(cell).is_none(),
            FieldView::Sensed => state.has_entity(EntityKind::Sensor, cell),
        };
        if visible {
            buffer.push(FieldCell {
                column,
                row,
                temperature,
                color: temperature_color(temperature, stops),
            });
        }
    }
}

/// Mean temperature over the fine cells of one game cell
pub fn cell_average(state: &GameState, resolution: u32, cell: GridPos) -> Option<f64> {
    let res = resolution as usize;
    if cell.x < 0 || cell.y < 0 || res == 0 {
        return None;
    }

    let (x0, y0) = (cell.x as usize * res, cell.y as usize * res);
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in y0..y0 + res {
        for column in x0..x0 + res {
            if let Some(t) = state.temp.get(column, row) {
                sum += t;
                count += 1;
            }
        }
    }

    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::simulation::state::Entity;
    use crate::spatial::grid::Grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state_with_field() -> GameState {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = GameState::initial(&config, &mut rng);
        let mut temp = Grid::new(100, 100);
        temp.fill_rect(0, 0, 100, 100, 21.0);
        temp.fill_rect(20, 30, 10, 10, 26.0);
        state.temp = temp;
        state
    }

    #[test]
    fn test_views_filter_by_entities() {
        let mut state = state_with_field();
        state.entities.push(Entity::new(EntityKind::Sensor, GridPos::new(2, 3)));
        state.entities.push(Entity::new(EntityKind::Farm, GridPos::new(0, 0)));
        let mut buffer = Vec::new();

        collect_field_cells(&state, 10, FieldView::All, &DEFAULT_STOPS, &mut buffer);
        assert_eq!(buffer.len(), 10_000);

        collect_field_cells(&state, 10, FieldView::Uncovered, &DEFAULT_STOPS, &mut buffer);
        assert_eq!(buffer.len(), 10_000 - 200);

        collect_field_cells(&state, 10, FieldView::Sensed, &DEFAULT_STOPS, &mut buffer);
        assert_eq!(buffer.len(), 100);
        assert!(buffer.iter().all(|c| c.color == Color::new(255, 0, 0)));
    }

    #[test]
    fn test_cell_average() {
        let state = state_with_field();
        assert_eq!(cell_average(&state, 10, GridPos::new(2, 3)), Some(26.0));
        assert_eq!(cell_average(&state, 10, GridPos::new(0, 0)), Some(21.0));
        assert_eq!(cell_average(&state, 10, GridPos::new(10, 0)), None);
    }
}
