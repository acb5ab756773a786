//! Page host: board containers, per-board controls and their listeners.

use std::cell::RefCell;
use std::rc::Weak;

use variation_player::{
    BoardHost, ControlPanel, ControllerError, MountError, PanelView, VariationDefinition,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlButtonElement, HtmlElement};

use crate::board::{create_widget, DomBoard, WidgetConfig};
use crate::{dispatch, Controller};

/// Id of the variation selector.
pub const DROPDOWN_ID: &str = "variation-dropdown";

/// Class shared by every board wrapper.
pub const WRAPPER_CLASS: &str = "board-wrapper";

const PLAY_ICON: &str = "fa-play";
const PAUSE_ICON: &str = "fa-pause";

/// Element ids belonging to one variation board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    /// chessboard.js container.
    pub board: String,
    /// Element shown or hidden on selection.
    pub wrapper: String,
    /// Step forward button.
    pub next: String,
    /// Step backward button.
    pub prev: String,
    /// Reset button.
    pub reset: String,
    /// Play/pause button holding the icon.
    pub autoplay: String,
    /// Move heading and annotation text.
    pub annotation: String,
    /// Ply counter.
    pub counter: String,
}

impl ElementIds {
    /// Derives the ids from the variation id.
    pub fn new(variation_id: &str) -> Self {
        let board = format!("{}-board", variation_id);
        Self {
            wrapper: format!("{}-wrapper", board),
            next: format!("{}-next-btn", board),
            prev: format!("{}-prev-btn", board),
            reset: format!("{}-reset-btn", board),
            autoplay: format!("{}-autoplay-btn", board),
            annotation: format!("{}-annotation-text", board),
            counter: format!("{}-move-counter", board),
            board,
        }
    }
}

/// Registers a listener that lives as long as the page.
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!("Cannot listen for {}: {:?}", event, err);
    }
    closure.forget();
}

fn set_display(element: &Element, display: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        if let Err(err) = element.style().set_property("display", display) {
            tracing::debug!("Cannot set display on #{}: {:?}", element.id(), err);
        }
    }
}

/// [`BoardHost`] over the page's board containers.
pub struct DomHost {
    document: Document,
    controller: Weak<RefCell<Controller>>,
    piece_theme: String,
}

impl DomHost {
    /// Creates a host whose control listeners reach `controller`.
    pub fn new(
        document: Document,
        controller: Weak<RefCell<Controller>>,
        piece_theme: String,
    ) -> Self {
        Self {
            document,
            controller,
            piece_theme,
        }
    }

    fn wire(&self, button_id: &str, variation_id: &str, action: Action) {
        let Some(button) = self.document.get_element_by_id(button_id) else {
            tracing::debug!("No control #{}", button_id);
            return;
        };
        let controller = self.controller.clone();
        let id = variation_id.to_string();
        listen(&button, "click", move || {
            dispatch(&controller, |c| action.apply(c, &id));
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Next,
    Previous,
    Reset,
    Autoplay,
}

impl Action {
    fn apply(self, controller: &mut Controller, id: &str) -> Result<(), ControllerError> {
        match self {
            Action::Next => controller.step_forward(id),
            Action::Previous => controller.step_backward(id),
            Action::Reset => controller.reset(id),
            Action::Autoplay => controller.toggle_autoplay(id),
        }
    }
}

impl BoardHost for DomHost {
    type Renderer = DomBoard;
    type Panel = DomPanel;

    fn mount(
        &mut self,
        variation: &VariationDefinition,
    ) -> Result<(DomBoard, DomPanel), MountError> {
        let ids = ElementIds::new(&variation.id);
        if self.document.get_element_by_id(&ids.board).is_none() {
            return Err(MountError::ContainerMissing(ids.board));
        }

        let widget = create_widget(&ids.board, &WidgetConfig::variation(&self.piece_theme))?;

        self.wire(&ids.next, &variation.id, Action::Next);
        self.wire(&ids.prev, &variation.id, Action::Previous);
        self.wire(&ids.reset, &variation.id, Action::Reset);
        self.wire(&ids.autoplay, &variation.id, Action::Autoplay);

        let board = DomBoard::new(self.document.clone(), ids.board.clone(), widget);
        let panel = DomPanel::new(self.document.clone(), ids);
        Ok((board, panel))
    }

    fn hide_all(&mut self) {
        let Ok(wrappers) = self
            .document
            .query_selector_all(&format!(".{}", WRAPPER_CLASS))
        else {
            return;
        };
        for i in 0..wrappers.length() {
            if let Some(wrapper) = wrappers.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                set_display(&wrapper, "none");
            }
        }
    }

    fn show(&mut self, variation_id: &str) {
        let ids = ElementIds::new(variation_id);
        match self.document.get_element_by_id(&ids.wrapper) {
            Some(wrapper) => set_display(&wrapper, "block"),
            None => tracing::warn!("No wrapper #{}", ids.wrapper),
        }
    }
}

/// [`ControlPanel`] over a board's buttons, annotation and counter.
pub struct DomPanel {
    document: Document,
    ids: ElementIds,
}

impl DomPanel {
    /// Creates the panel for one board's controls.
    pub fn new(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    fn set_disabled(&self, button_id: &str, disabled: bool) {
        if let Some(button) = self
            .document
            .get_element_by_id(button_id)
            .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(disabled);
        }
    }

    fn write_annotation(&self, heading: &str, text: &str) {
        let Some(container) = self.document.get_element_by_id(&self.ids.annotation) else {
            return;
        };
        container.set_inner_html("");
        for (tag, content) in [("h4", heading), ("p", text)] {
            if let Ok(element) = self.document.create_element(tag) {
                element.set_text_content(Some(content));
                if let Err(err) = container.append_child(&element) {
                    tracing::debug!("Cannot write #{}: {:?}", self.ids.annotation, err);
                }
            }
        }
    }
}

impl ControlPanel for DomPanel {
    fn paint(&mut self, view: &PanelView) {
        self.write_annotation(&view.heading(), &view.annotation);
        if let Some(counter) = self.document.get_element_by_id(&self.ids.counter) {
            counter.set_text_content(Some(&view.counter));
        }
        self.set_disabled(&self.ids.prev, !view.can_step_backward);
        self.set_disabled(&self.ids.next, !view.can_step_forward);
        self.set_playing(view.playing);
    }

    fn set_playing(&mut self, playing: bool) {
        let selector = format!("#{} i", self.ids.autoplay);
        let Ok(Some(icon)) = self.document.query_selector(&selector) else {
            return;
        };
        let (from, to) = if playing {
            (PLAY_ICON, PAUSE_ICON)
        } else {
            (PAUSE_ICON, PLAY_ICON)
        };
        let classes = icon.class_list();
        if let Err(err) = classes.remove_1(from).and_then(|()| classes.add_1(to)) {
            tracing::debug!("Cannot swap icon on #{}: {:?}", self.ids.autoplay, err);
        }
    }
}
