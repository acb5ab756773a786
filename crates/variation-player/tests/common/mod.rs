//! In-memory page and timer hosts shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use variation_catalog::builtin::builtin_catalog;
use variation_player::{
    BoardHost, BoardRenderer, Catalog, ControlPanel, HighlightColor, MountError, PanelView,
    PlayerConfig, PositionSnapshot, Scheduler, ShakmatyEngine, Square, TimerHandle,
    VariationController, VariationDefinition,
};

/// Width a visible widget measures after a resize.
pub const VISIBLE_WIDTH: u32 = 400;

/// Everything the page saw, per board id.
#[derive(Debug, Default)]
pub struct PageLog {
    pub mounted: Vec<String>,
    pub visible: HashSet<String>,
    pub renders: HashMap<String, Vec<PositionSnapshot>>,
    pub highlights: HashMap<String, Vec<(Vec<String>, HighlightColor)>>,
    pub panels: HashMap<String, Vec<PanelView>>,
    pub playing: HashMap<String, bool>,
    pub widths: HashMap<String, u32>,
    pub resizes: HashMap<String, usize>,
}

impl PageLog {
    pub fn render_count(&self, id: &str) -> usize {
        self.renders.get(id).map_or(0, Vec::len)
    }

    pub fn highlight_count(&self, id: &str) -> usize {
        self.highlights.get(id).map_or(0, Vec::len)
    }

    pub fn panel_count(&self, id: &str) -> usize {
        self.panels.get(id).map_or(0, Vec::len)
    }

    /// Total adapter calls seen for one board.
    pub fn call_count(&self, id: &str) -> usize {
        self.render_count(id) + self.highlight_count(id) + self.panel_count(id)
    }

    pub fn last_render(&self, id: &str) -> Option<&PositionSnapshot> {
        self.renders.get(id).and_then(|r| r.last())
    }

    pub fn last_highlight(&self, id: &str) -> Option<&(Vec<String>, HighlightColor)> {
        self.highlights.get(id).and_then(|h| h.last())
    }

    pub fn last_panel(&self, id: &str) -> Option<&PanelView> {
        self.panels.get(id).and_then(|p| p.last())
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.playing.get(id).copied().unwrap_or(false)
    }

    pub fn width(&self, id: &str) -> u32 {
        self.widths.get(id).copied().unwrap_or(0)
    }

    pub fn resize_count(&self, id: &str) -> usize {
        self.resizes.get(id).copied().unwrap_or(0)
    }
}

pub type Page = Rc<RefCell<PageLog>>;

/// Page host whose containers are all present unless listed as missing.
pub struct RecordingHost {
    page: Page,
    missing: HashSet<String>,
}

impl RecordingHost {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            missing: HashSet::new(),
        }
    }

    pub fn without_container(mut self, id: &str) -> Self {
        self.missing.insert(id.to_string());
        self
    }
}

impl BoardHost for RecordingHost {
    type Renderer = RecordingBoard;
    type Panel = RecordingPanel;

    fn mount(
        &mut self,
        variation: &VariationDefinition,
    ) -> Result<(RecordingBoard, RecordingPanel), MountError> {
        if self.missing.contains(&variation.id) {
            return Err(MountError::ContainerMissing(variation.id.clone()));
        }
        let mut page = self.page.borrow_mut();
        page.mounted.push(variation.id.clone());
        page.widths.insert(variation.id.clone(), 0);
        Ok((
            RecordingBoard {
                id: variation.id.clone(),
                page: Rc::clone(&self.page),
            },
            RecordingPanel {
                id: variation.id.clone(),
                page: Rc::clone(&self.page),
            },
        ))
    }

    fn hide_all(&mut self) {
        self.page.borrow_mut().visible.clear();
    }

    fn show(&mut self, variation_id: &str) {
        self.page.borrow_mut().visible.insert(variation_id.to_string());
    }
}

/// Widget that measures zero width unless resized while visible.
pub struct RecordingBoard {
    id: String,
    page: Page,
}

impl BoardRenderer for RecordingBoard {
    fn render(&mut self, position: &PositionSnapshot) {
        self.page
            .borrow_mut()
            .renders
            .entry(self.id.clone())
            .or_default()
            .push(position.clone());
    }

    fn highlight(&mut self, squares: &[Square], color: HighlightColor) {
        let names = squares.iter().map(|s| s.to_algebraic()).collect();
        self.page
            .borrow_mut()
            .highlights
            .entry(self.id.clone())
            .or_default()
            .push((names, color));
    }

    fn force_resize(&mut self) {
        let mut page = self.page.borrow_mut();
        let width = if page.visible.contains(&self.id) {
            VISIBLE_WIDTH
        } else {
            0
        };
        page.widths.insert(self.id.clone(), width);
        *page.resizes.entry(self.id.clone()).or_default() += 1;
    }
}

pub struct RecordingPanel {
    id: String,
    page: Page,
}

impl ControlPanel for RecordingPanel {
    fn paint(&mut self, view: &PanelView) {
        let mut page = self.page.borrow_mut();
        page.playing.insert(self.id.clone(), view.playing);
        page.panels
            .entry(self.id.clone())
            .or_default()
            .push(view.clone());
    }

    fn set_playing(&mut self, playing: bool) {
        self.page.borrow_mut().playing.insert(self.id.clone(), playing);
    }
}

/// A timer event that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired {
    Autoplay(String, TimerHandle),
    Resize(String),
}

#[derive(Debug)]
struct Timer {
    handle: TimerHandle,
    variation_id: String,
    due_ms: u64,
    every_ms: Option<u64>,
}

/// Virtual clock scheduler; time only moves in [`run_for`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_handle: u64,
    timers: Vec<Timer>,
    pub cancelled: Vec<TimerHandle>,
}

impl ManualScheduler {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of running autoplay timers.
    pub fn autoplay_timers(&self) -> usize {
        self.timers.iter().filter(|t| t.every_ms.is_some()).count()
    }

    /// Number of pending one-shot resizes.
    pub fn pending_resizes(&self) -> usize {
        self.timers.iter().filter(|t| t.every_ms.is_none()).count()
    }

    fn issue(&mut self) -> TimerHandle {
        self.next_handle += 1;
        TimerHandle(self.next_handle)
    }

    /// Pops the earliest timer due at or before `until_ms`.
    fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;

        self.now_ms = self.timers[index].due_ms;
        match self.timers[index].every_ms {
            Some(every) => {
                let timer = &mut self.timers[index];
                timer.due_ms += every;
                Some(Fired::Autoplay(timer.variation_id.clone(), timer.handle))
            }
            None => {
                let timer = self.timers.remove(index);
                Some(Fired::Resize(timer.variation_id))
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn start_autoplay(&mut self, variation_id: &str, interval: Duration) -> TimerHandle {
        let handle = self.issue();
        let every = interval.as_millis() as u64;
        self.timers.push(Timer {
            handle,
            variation_id: variation_id.to_string(),
            due_ms: self.now_ms + every,
            every_ms: Some(every),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
        self.cancelled.push(handle);
    }

    fn schedule_resize(&mut self, variation_id: &str, delay: Duration) {
        let handle = self.issue();
        self.timers.push(Timer {
            handle,
            variation_id: variation_id.to_string(),
            due_ms: self.now_ms + delay.as_millis() as u64,
            every_ms: None,
        });
    }
}

pub type TestController = VariationController<ShakmatyEngine, RecordingHost, ManualScheduler>;

/// Controller over the built-in catalog with default settings.
pub fn controller() -> (TestController, Page) {
    controller_with(builtin_catalog(), PlayerConfig::default(), |host| host)
}

/// Controller over a custom catalog, config and host setup.
pub fn controller_with(
    catalog: Catalog,
    config: PlayerConfig,
    setup: impl FnOnce(RecordingHost) -> RecordingHost,
) -> (TestController, Page) {
    let page = Page::default();
    let host = setup(RecordingHost::new(Rc::clone(&page)));
    let controller = VariationController::new(
        catalog,
        ShakmatyEngine::new(),
        host,
        ManualScheduler::default(),
        config,
    );
    (controller, page)
}

/// Advances the virtual clock, delivering every timer that comes due.
pub fn run_for(controller: &mut TestController, ms: u64) -> Vec<Fired> {
    let until = controller.scheduler().now_ms() + ms;
    let mut fired = Vec::new();
    while let Some(event) = controller.scheduler_mut().pop_due(until) {
        match &event {
            Fired::Autoplay(id, handle) => {
                controller
                    .on_autoplay_tick(id, *handle)
                    .expect("autoplay tick failed");
            }
            Fired::Resize(id) => controller.on_resize_due(id),
        }
        fired.push(event);
    }
    controller.scheduler_mut().now_ms = until;
    fired
}
