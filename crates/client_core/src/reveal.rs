use crate::dom::{Revealable, Viewport, REVEAL_MARGIN_PX, SCROLL_TOP_THRESHOLD_PX, VISIBLE_CLASS};

/// Marks every element whose top edge has entered the viewport as visible.
/// Returns how many became visible during this pass.
pub fn reveal_pass(elements: &mut [Revealable], viewport: Viewport) -> usize {
    let threshold = viewport.height - REVEAL_MARGIN_PX;
    let mut newly_visible = 0;
    for element in elements.iter_mut().filter(|e| !e.is_visible()) {
        let top = element.document_top - viewport.scroll_y;
        if top < threshold {
            element.classes.add(VISIBLE_CLASS);
            newly_visible += 1;
        }
    }
    newly_visible
}

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_y: f64) -> Viewport {
        Viewport {
            scroll_y,
            height: 600.0,
        }
    }

    #[test]
    fn reveals_elements_above_the_margin() {
        let mut elements = vec![
            Revealable::new("hero", 100.0),
            Revealable::new("edge", 560.0),
            Revealable::new("footer", 1500.0),
        ];
        assert_eq!(reveal_pass(&mut elements, viewport(0.0)), 1);
        assert!(elements[0].is_visible());
        assert!(!elements[1].is_visible());
        assert!(!elements[2].is_visible());
    }

    #[test]
    fn visibility_is_monotonic() {
        let mut elements = vec![Revealable::new("footer", 1500.0)];
        assert_eq!(reveal_pass(&mut elements, viewport(1000.0)), 1);
        assert_eq!(reveal_pass(&mut elements, viewport(0.0)), 0);
        assert!(elements[0].is_visible());

        elements[0].reset();
        reveal_pass(&mut elements, viewport(0.0));
        assert!(!elements[0].is_visible());
    }

    #[test]
    fn scroll_top_threshold() {
        for offset in [0.0, 120.0, 200.0] {
            assert!(!scroll_top_visible(offset), "offset {offset}");
        }
        for offset in [200.5, 201.0, 5000.0] {
            assert!(scroll_top_visible(offset), "offset {offset}");
        }
    }
}
