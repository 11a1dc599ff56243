use super::types::{InputEvent, Modifiers, PointerButtonEvent, PointerMoveEvent};

/// Pointer and modifier state the winit translation needs between events.
///
/// Pointer deltas and button positions are derived from `pointer_pos`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::PointerMoved(PointerMoveEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::PointerButton(PointerButtonEvent { x, y, modifiers, .. }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
            }

            InputEvent::Key { modifiers, .. } | InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::Focused(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y, dx: 0.0, dy: 0.0 })
    }

    #[test]
    fn pointer_position_follows_moves_until_left() {
        let mut state = InputState::default();
        state.apply_event(&moved(3.0, 4.0));
        state.apply_event(&moved(5.0, 1.0));
        assert_eq!(state.pointer_pos, Some((5.0, 1.0)));

        state.apply_event(&InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn modifiers_are_tracked() {
        let mut state = InputState::default();
        let shift = Modifiers { shift: true, ..Modifiers::default() };
        state.apply_event(&InputEvent::ModifiersChanged(shift));
        assert!(state.modifiers.shift);

        state.apply_event(&InputEvent::Focused(false));
        assert!(state.modifiers.shift);
    }
}
