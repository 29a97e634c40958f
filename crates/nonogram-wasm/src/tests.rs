//! Tests for the canvas-independent parts of the WASM grid

#[cfg(test)]
mod tests {
    use crate::theme::Theme;
    use crate::{pressed_button, NonogramGame};
    use nonogram_core::{
        Buttons, Color, GridConfig, PointerEvent, RecordingSurface, Session, SAMPLE_PUZZLE,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_canvas(id: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document.create_element("canvas").unwrap();
        canvas.set_id(id);
        document.body().unwrap().append_child(&canvas).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_pressed_button_mapping() {
        assert_eq!(pressed_button(0), Buttons::PRIMARY);
        assert_eq!(pressed_button(1), Buttons::AUXILIARY);
        assert_eq!(pressed_button(2), Buttons::SECONDARY);
        assert_eq!(pressed_button(4), Buttons::empty());
    }

    #[wasm_bindgen_test]
    fn test_theme_lookup() {
        assert_eq!(Theme::named("paper"), Theme::paper());
        assert_eq!(Theme::named("high_contrast"), Theme::high_contrast());
        assert_eq!(Theme::named("unknown"), Theme::light());
    }

    #[wasm_bindgen_test]
    fn test_theme_style() {
        let style = Theme::light().style();
        assert_eq!(style.hover_outline, "rgb(0, 0, 255)");
        assert_eq!(style.empty_cell, "rgb(255, 255, 255)");
        assert_eq!(style.separator_width, 3.0);

        let style = Theme::high_contrast().style();
        assert_eq!(style.cell_line_width, 1.5);
    }

    #[wasm_bindgen_test]
    fn test_secondary_click_does_not_paint() {
        let mut session = Session::from_xml(SAMPLE_PUZZLE, GridConfig::default()).unwrap();
        session.resize(400.0, 400.0);
        session.choose_color(Some(Color::new("red")));

        let (x, y) = session.geometry().cell_top_left(2, 2);
        let outcome = session.pointer_down(PointerEvent::new(x + 1.0, y + 1.0, pressed_button(2)));
        assert!(!outcome.painted);
        let outcome = session.pointer_down(PointerEvent::new(x + 1.0, y + 1.0, pressed_button(0)));
        assert!(outcome.painted);

        session.set_style(Theme::paper().style());
        let mut surface = RecordingSurface::new();
        session.render(&mut surface);
        assert!(!session.needs_redraw());
    }

    #[wasm_bindgen_test]
    fn test_theme_json_for_page() {
        let json = serde_json::to_string(&Theme::paper()).unwrap();
        assert!(json.contains(r#""background":{"r":246,"g":240,"b":225}"#));
    }

    #[wasm_bindgen_test]
    fn test_square_surface_config() {
        mount_canvas("square-grid");
        let mut game = NonogramGame::new("square-grid", SAMPLE_PUZZLE).unwrap();
        game.resize(300.0, 500.0);
        assert_eq!((game.get_height(), game.get_width()), (300.0, 500.0));

        game.set_config_json(r#"{"square_surface": true, "theme": "paper"}"#)
            .unwrap();
        assert_eq!(game.get_width(), game.get_height());
        assert_eq!(game.get_width(), 300.0);
        assert!(game.get_theme_json().contains("246"));

        assert!(game.set_config_json("not json").is_err());
        assert_eq!(game.get_width(), 300.0);
    }
}
