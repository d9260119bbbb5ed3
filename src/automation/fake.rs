//! In-memory desktop that records every interaction.
//!
//! Nodes can be bound to a page: they only appear in the tree after the
//! button named by that page has been clicked, the way Radeon Settings swaps
//! its content area.
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::{Desktop, Element, Pointer, Window};
use crate::config::LayoutConfig;
use crate::engine::types::{Point, Rect};
use crate::errors::{AutoconfError, AutoconfResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Launch(PathBuf),
    WaitIdle,
    Kill(String),
    FindWindow(String),
    Focus,
    Click(String),
    Invoke(String),
    Toggle(String),
    MoveTo(Point),
    LeftClick,
}

#[derive(Debug, Clone)]
struct FakeNode {
    name: String,
    bounds: Rect,
    point: Point,
    toggled: Option<bool>,
    button: bool,
    page: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    nodes: Vec<FakeNode>,
    window_misses: u32,
    current_page: Option<String>,
    stuck_toggles: bool,
    events: Vec<Event>,
}

impl FakeState {
    fn visible(&self, index: usize) -> bool {
        match &self.nodes[index].page {
            None => true,
            Some(page) => self.current_page.as_deref() == Some(page.as_str()),
        }
    }

    fn visible_indices(&self) -> Vec<usize> {
        (0..self.nodes.len()).filter(|&i| self.visible(i)).collect()
    }
}

#[derive(Clone, Default)]
pub struct FakeDesktop {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every navigation control of the real layout for `cards` cards, with an
    /// HBCC toggle on each graphics page (initially `hbcc_on`) and a full set
    /// of WattMan controls on each WattMan page.
    pub fn radeon(layout: &LayoutConfig, cards: usize, hbcc_on: bool) -> Self {
        let desktop = Self::new()
            .with_button(&layout.maximize_button)
            .with_button(&layout.gaming_button)
            .with_button(&layout.global_settings_button);

        for card in 0..cards {
            let graphics = layout.hbcc_page_button(card);
            let wattman = layout.wattman_page_button(cards, card);
            desktop
                .add_button(&graphics, None)
                .add_button(&wattman, None)
                .add_toggle(&format!("virtualmemory {card} ComboBoxToggle"), hbcc_on, Some(graphics.as_str()))
                .add_button(&layout.hbcc_apply_button, Some(graphics.as_str()))
                .add_button(&layout.hbcc_confirm_button, Some(graphics.as_str()))
                .add_wattman_page(layout, &wattman);
        }
        desktop
    }

    fn add_wattman_page(&self, layout: &LayoutConfig, page: &str) -> &Self {
        self.add_control(&layout.overdrive_scrollbar, Some(page))
            .add_slider(
                "GPU Frequency Slider_0",
                Rect { left: 100, top: 400, right: 300, bottom: 420 },
                Point { x: 200, y: 410 },
                Some(page),
            )
            .add_slider(
                "Memory Frequency Slider_0",
                Rect { left: 100, top: 450, right: 500, bottom: 470 },
                Point { x: 300, y: 460 },
                Some(page),
            )
            .add_toggle("Temperature Temperature Manual", false, Some(page))
            .add_slider(
                "Temperature Target Slider_0",
                Rect { left: 600, top: 200, right: 620, bottom: 400 },
                Point { x: 610, y: 300 },
                Some(page),
            )
            .add_slider(
                "Temperature TDP Limit  Slider_0",
                Rect { left: 100, top: 500, right: 300, bottom: 520 },
                Point { x: 200, y: 510 },
                Some(page),
            )
            .add_button(&layout.wattman_apply_button, Some(page))
    }

    fn push(&self, node: FakeNode) -> &Self {
        self.state.borrow_mut().nodes.push(node);
        self
    }

    fn add_button(&self, name: &str, page: Option<&str>) -> &Self {
        self.push(FakeNode {
            name: name.into(),
            bounds: Rect::default(),
            point: Point::default(),
            toggled: None,
            button: true,
            page: page.map(str::to_string),
        })
    }

    fn add_control(&self, name: &str, page: Option<&str>) -> &Self {
        self.push(FakeNode {
            name: name.into(),
            bounds: Rect::default(),
            point: Point::default(),
            toggled: None,
            button: false,
            page: page.map(str::to_string),
        })
    }

    fn add_toggle(&self, name: &str, on: bool, page: Option<&str>) -> &Self {
        self.push(FakeNode {
            name: name.into(),
            bounds: Rect::default(),
            point: Point::default(),
            toggled: Some(on),
            button: false,
            page: page.map(str::to_string),
        })
    }

    fn add_slider(&self, name: &str, bounds: Rect, point: Point, page: Option<&str>) -> &Self {
        self.push(FakeNode {
            name: name.into(),
            bounds,
            point,
            toggled: None,
            button: false,
            page: page.map(str::to_string),
        })
    }

    pub fn with_button(self, name: &str) -> Self {
        self.add_button(name, None);
        self
    }

    pub fn with_control(self, name: &str) -> Self {
        self.add_control(name, None);
        self
    }

    pub fn with_toggle(self, name: &str, on: bool) -> Self {
        self.add_toggle(name, on, None);
        self
    }

    /// Removes every node with this exact name.
    pub fn without(self, name: &str) -> Self {
        self.state.borrow_mut().nodes.retain(|n| n.name != name);
        self
    }

    /// The next `misses` window lookups fail.
    pub fn missing_window(self, misses: u32) -> Self {
        self.state.borrow_mut().window_misses = misses;
        self
    }

    /// Toggles accept the call but keep their state.
    pub fn with_stuck_toggles(self) -> Self {
        self.state.borrow_mut().stuck_toggles = true;
        self
    }

    pub fn pointer(&self) -> FakePointer {
        FakePointer {
            state: Rc::clone(&self.state),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Click(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|e| *e == wanted).count()
    }

    /// Pointer position at each left click.
    pub fn pointer_clicks(&self) -> Vec<Point> {
        let mut at = Point::default();
        let mut clicks = Vec::new();
        for event in self.events() {
            match event {
                Event::MoveTo(p) => at = p,
                Event::LeftClick => clicks.push(at),
                _ => {}
            }
        }
        clicks
    }

    pub fn toggle_state(&self, name: &str) -> Option<bool> {
        self.state
            .borrow()
            .nodes
            .iter()
            .find(|n| n.name == name)
            .and_then(|n| n.toggled)
    }

    fn record(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

impl Desktop for FakeDesktop {
    type Process = u32;
    type Window = FakeWindow;

    fn launch(&self, path: &Path) -> AutoconfResult<u32> {
        self.record(Event::Launch(path.to_path_buf()));
        Ok(4242)
    }

    fn wait_for_input_idle(&self, _process: &u32) -> AutoconfResult<()> {
        self.record(Event::WaitIdle);
        Ok(())
    }

    fn kill_by_name(&self, image: &str) -> AutoconfResult<()> {
        let mut state = self.state.borrow_mut();
        state.events.push(Event::Kill(image.into()));
        state.current_page = None;
        Ok(())
    }

    fn find_window(&self, title: &str, _timeout: Duration) -> AutoconfResult<Option<FakeWindow>> {
        let mut state = self.state.borrow_mut();
        state.events.push(Event::FindWindow(title.into()));
        if state.window_misses > 0 {
            state.window_misses -= 1;
            return Ok(None);
        }
        Ok(Some(FakeWindow {
            state: Rc::clone(&self.state),
        }))
    }
}

pub struct FakeWindow {
    state: Rc<RefCell<FakeState>>,
}

impl FakeWindow {
    fn element(&self, index: usize) -> FakeElement {
        FakeElement {
            state: Rc::clone(&self.state),
            index,
        }
    }

    fn lookup(&self, name: &str, button_only: bool) -> Option<FakeElement> {
        let state = self.state.borrow();
        state
            .visible_indices()
            .into_iter()
            .find(|&i| state.nodes[i].name == name && (!button_only || state.nodes[i].button))
            .map(|i| self.element(i))
    }
}

impl Window for FakeWindow {
    type Element = FakeElement;

    fn focus(&self) -> AutoconfResult<()> {
        self.state.borrow_mut().events.push(Event::Focus);
        Ok(())
    }

    fn button(&self, name: &str) -> AutoconfResult<Option<FakeElement>> {
        Ok(self.lookup(name, true))
    }

    fn control_by_name(&self, name: &str) -> AutoconfResult<Option<FakeElement>> {
        Ok(self.lookup(name, false))
    }

    fn descendants(&self) -> AutoconfResult<Vec<FakeElement>> {
        let indices = self.state.borrow().visible_indices();
        Ok(indices.into_iter().map(|i| self.element(i)).collect())
    }
}

pub struct FakeElement {
    state: Rc<RefCell<FakeState>>,
    index: usize,
}

impl FakeElement {
    fn node(&self) -> FakeNode {
        self.state.borrow().nodes[self.index].clone()
    }
}

impl Element for FakeElement {
    fn name(&self) -> String {
        self.node().name
    }

    fn bounds(&self) -> AutoconfResult<Rect> {
        Ok(self.node().bounds)
    }

    fn clickable_point(&self) -> AutoconfResult<Point> {
        Ok(self.node().point)
    }

    fn toggle_state(&self) -> AutoconfResult<bool> {
        self.node()
            .toggled
            .ok_or_else(|| AutoconfError::Automation(format!("'{}' is not a toggle", self.name())))
    }

    fn toggle(&self) -> AutoconfResult<()> {
        let mut state = self.state.borrow_mut();
        let stuck = state.stuck_toggles;
        let node = &mut state.nodes[self.index];
        let name = node.name.clone();
        match node.toggled.as_mut() {
            Some(on) if !stuck => *on = !*on,
            Some(_) => {}
            None => return Err(AutoconfError::Automation(format!("'{name}' is not a toggle"))),
        }
        state.events.push(Event::Toggle(name));
        Ok(())
    }

    fn click(&self) -> AutoconfResult<()> {
        let mut state = self.state.borrow_mut();
        let name = state.nodes[self.index].name.clone();
        if state.nodes.iter().any(|n| n.page.as_deref() == Some(name.as_str())) {
            state.current_page = Some(name.clone());
        }
        state.events.push(Event::Click(name));
        Ok(())
    }

    fn invoke(&self) -> AutoconfResult<()> {
        let name = self.name();
        self.state.borrow_mut().events.push(Event::Invoke(name));
        Ok(())
    }
}

pub struct FakePointer {
    state: Rc<RefCell<FakeState>>,
}

impl Pointer for FakePointer {
    fn move_to(&mut self, point: Point) -> AutoconfResult<()> {
        self.state.borrow_mut().events.push(Event::MoveTo(point));
        Ok(())
    }

    fn left_click(&mut self) -> AutoconfResult<()> {
        self.state.borrow_mut().events.push(Event::LeftClick);
        Ok(())
    }
}
