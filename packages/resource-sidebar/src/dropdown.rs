//! Currency picker open/close state and outside-click handling.
//!
//! The outside-click listener is a scoped capability: opening the dropdown
//! acquires an [`OutsideClickGuard`] from [`PointerEvents`], and the open state
//! owns it. Any transition back to closed, or dropping the dropdown, releases it.

use resource_types::CurrencyUnit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Pointer position in UI coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the control (button + option list). Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Registry of document-level pointer-down listeners.
#[derive(Debug, Clone, Default)]
pub struct PointerEvents {
    listeners: Arc<AtomicUsize>,
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an outside-click listener for as long as the guard lives.
    pub fn listen(&self) -> OutsideClickGuard {
        self.listeners.fetch_add(1, Ordering::Relaxed);
        OutsideClickGuard {
            listeners: Arc::clone(&self.listeners),
        }
    }

    /// Live registrations. Zero whenever no dropdown is open.
    pub fn listener_count(&self) -> usize {
        self.listeners.load(Ordering::Relaxed)
    }
}

/// RAII registration from [`PointerEvents::listen`]. Unregisters on drop.
#[derive(Debug)]
pub struct OutsideClickGuard {
    listeners: Arc<AtomicUsize>,
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        self.listeners.fetch_sub(1, Ordering::Relaxed);
    }
}

#[derive(Debug)]
enum DropdownState {
    Closed,
    Open(OutsideClickGuard),
}

/// Wei/Eth picker next to the price input.
#[derive(Debug)]
pub struct CurrencyDropdown {
    selected: CurrencyUnit,
    region: Region,
    events: PointerEvents,
    state: DropdownState,
}

impl CurrencyDropdown {
    pub fn new(events: PointerEvents) -> Self {
        Self {
            selected: CurrencyUnit::default(),
            region: Region::default(),
            events,
            state: DropdownState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DropdownState::Open(_))
    }

    pub fn selected(&self) -> CurrencyUnit {
        self.selected
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Update the control's bounds after layout.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn toggle(&mut self) {
        self.state = match std::mem::replace(&mut self.state, DropdownState::Closed) {
            DropdownState::Closed => DropdownState::Open(self.events.listen()),
            DropdownState::Open(_) => DropdownState::Closed,
        };
    }

    /// Choose a unit and force-close.
    pub fn select(&mut self, unit: CurrencyUnit) {
        self.selected = unit;
        self.close();
    }

    pub fn close(&mut self) {
        self.state = DropdownState::Closed;
    }

    /// Feed a document pointer-down. Returns `true` if it closed the dropdown.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        if !self.is_open() || self.region.contains(at) {
            return false;
        }
        debug!(x = at.x, y = at.y, "Pointer-down outside currency picker");
        self.close();
        true
    }
}
