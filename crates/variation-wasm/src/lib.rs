//! Browser host for the annotated variation boards.
//!
//! This crate binds the variation player to the page: chessboard.js widgets,
//! the per-board buttons, the variation dropdown and the window's timers.
//!
//! # Usage
//!
//! ```javascript
//! import init, { VariationViewer } from 'variation-wasm';
//!
//! await init();
//!
//! // Builds the board selected in #variation-dropdown and wires every control.
//! const viewer = new VariationViewer({ autoplay_interval_ms: 1500 });
//! console.log(viewer.activeVariation());
//!
//! viewer.select("evans-gambit");
//! viewer.toggleAutoplay("evans-gambit");
//! ```
//!
//! A custom catalog can be passed as JSON in the second argument; the
//! built-in Italian Opening catalog is used otherwise.

mod board;
mod dom;
mod logging;
mod tactics;
mod timer;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Deserialize;
use variation_catalog::builtin::builtin_catalog;
use variation_player::{
    Catalog, ControllerError, PlayerConfig, ShakmatyEngine, VariationController,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

pub use board::{Chessboard, DomBoard, WidgetConfig, DEFAULT_PIECE_THEME};
pub use dom::{DomHost, DomPanel, ElementIds, DROPDOWN_ID};
pub use logging::ConsoleMakeWriter;
pub use timer::BrowserScheduler;

/// The controller as wired to the page.
pub type Controller = VariationController<ShakmatyEngine, DomHost, BrowserScheduler>;

/// Runs a page event against the controller.
///
/// Events for a dropped viewer, or arriving while the controller is busy,
/// are discarded. Errors were already logged by the controller.
pub(crate) fn dispatch(
    controller: &Weak<RefCell<Controller>>,
    event: impl FnOnce(&mut Controller) -> Result<(), ControllerError>,
) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    let Ok(mut controller) = controller.try_borrow_mut() else {
        tracing::warn!("Controller busy, dropping page event");
        return;
    };
    if let Err(err) = event(&mut controller) {
        tracing::debug!("Page event failed: {}", err);
    }
}

/// Viewer options: the player settings plus widget appearance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Player settings, given as top-level fields.
    #[serde(flatten)]
    pub player: PlayerConfig,
    /// chessboard.js piece image pattern.
    pub piece_theme: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            piece_theme: DEFAULT_PIECE_THEME.to_string(),
        }
    }
}

/// The variation boards of one page.
#[wasm_bindgen]
pub struct VariationViewer {
    controller: Rc<RefCell<Controller>>,
    _diagrams: Vec<Chessboard>,
}

#[wasm_bindgen]
impl VariationViewer {
    /// Wires the page and shows the initially selected variation.
    ///
    /// `options` takes the [`ViewerOptions`] fields; `catalog_json` replaces
    /// the built-in catalog. Returns an error if either is malformed or the
    /// page has no document.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue, catalog_json: Option<String>) -> Result<VariationViewer, JsError> {
        let options: ViewerOptions = if options.is_undefined() || options.is_null() {
            ViewerOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsError::new(&format!("Invalid viewer options: {}", e)))?
        };
        let catalog = match catalog_json {
            Some(json) => Catalog::from_json(&json)?,
            None => builtin_catalog(),
        };

        let window = web_sys::window().ok_or_else(|| JsError::new("no global `window` exists"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("no document on window"))?;

        let diagrams = tactics::mount_diagrams(&document, catalog.tactics(), &options.piece_theme);

        let ViewerOptions {
            player,
            piece_theme,
        } = options;
        let controller = Rc::new_cyclic(|weak: &Weak<RefCell<Controller>>| {
            RefCell::new(VariationController::new(
                catalog,
                ShakmatyEngine::new(),
                DomHost::new(document.clone(), weak.clone(), piece_theme),
                BrowserScheduler::new(window.clone(), weak.clone()),
                player,
            ))
        });
        let weak = Rc::downgrade(&controller);

        for event in ["load", "resize"] {
            let weak = weak.clone();
            dom::listen(&window, event, move || {
                dispatch(&weak, |c| {
                    c.resize_all();
                    Ok(())
                });
            });
        }

        let dropdown = document
            .get_element_by_id(DROPDOWN_ID)
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok());
        let initial = dropdown
            .as_ref()
            .map(HtmlSelectElement::value)
            .filter(|value| !value.is_empty())
            .or_else(|| {
                controller
                    .borrow()
                    .default_selection()
                    .map(str::to_owned)
            });

        if let Some(dropdown) = dropdown {
            let weak = weak.clone();
            let select = dropdown.clone();
            dom::listen(&dropdown, "change", move || {
                let id = select.value();
                dispatch(&weak, |c| c.select(&id));
            });
            if let Some(id) = &initial {
                dropdown.set_value(id);
            }
        }

        if let Some(id) = initial {
            if let Err(err) = controller.borrow_mut().select(&id) {
                tracing::warn!("Initial variation {} not shown: {}", id, err);
            }
        }

        tracing::info!(
            "Variation viewer ready ({} variations)",
            controller.borrow().catalog().len()
        );
        Ok(VariationViewer {
            controller,
            _diagrams: diagrams,
        })
    }

    /// Shows a variation, creating its board on first use.
    pub fn select(&self, variation_id: &str) -> Result<(), JsError> {
        self.with(|c| c.select(variation_id))
    }

    /// Shows the next ply of a board.
    #[wasm_bindgen(js_name = stepForward)]
    pub fn step_forward(&self, variation_id: &str) -> Result<(), JsError> {
        self.with(|c| c.step_forward(variation_id))
    }

    /// Shows the previous ply of a board.
    #[wasm_bindgen(js_name = stepBackward)]
    pub fn step_backward(&self, variation_id: &str) -> Result<(), JsError> {
        self.with(|c| c.step_backward(variation_id))
    }

    /// Returns a board to the starting position.
    pub fn reset(&self, variation_id: &str) -> Result<(), JsError> {
        self.with(|c| c.reset(variation_id))
    }

    /// Starts or stops a board's autoplay.
    #[wasm_bindgen(js_name = toggleAutoplay)]
    pub fn toggle_autoplay(&self, variation_id: &str) -> Result<(), JsError> {
        self.with(|c| c.toggle_autoplay(variation_id))
    }

    /// Re-measures every board.
    pub fn resize(&self) -> Result<(), JsError> {
        self.with(|c| {
            c.resize_all();
            Ok(())
        })
    }

    /// Returns the visible variation's id.
    #[wasm_bindgen(js_name = activeVariation)]
    pub fn active_variation(&self) -> Option<String> {
        self.controller.borrow().active().map(str::to_owned)
    }

    /// Returns every variation id in selector order.
    #[wasm_bindgen(js_name = variationIds)]
    pub fn variation_ids(&self) -> Vec<String> {
        self.controller
            .borrow()
            .catalog()
            .ids()
            .map(str::to_owned)
            .collect()
    }

    /// Returns the shown ply (-1 at the start), or null if the board was
    /// never created.
    #[wasm_bindgen(js_name = currentPly)]
    pub fn current_ply(&self, variation_id: &str) -> Option<i32> {
        self.controller
            .borrow()
            .state(variation_id)
            .map(|s| s.current_ply_index() as i32)
    }

    /// Returns true if the board is autoplaying.
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self, variation_id: &str) -> bool {
        self.controller
            .borrow()
            .state(variation_id)
            .is_some_and(|s| s.is_playing())
    }
}

impl VariationViewer {
    fn with(
        &self,
        f: impl FnOnce(&mut Controller) -> Result<(), ControllerError>,
    ) -> Result<(), JsError> {
        let mut controller = self
            .controller
            .try_borrow_mut()
            .map_err(|_| JsError::new("variation viewer is busy"))?;
        Ok(f(&mut controller)?)
    }
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);
}
