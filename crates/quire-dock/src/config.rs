//! Tunables for hit testing, resizing and history.

/// Default minimum pane extent in pixels while resizing.
pub const DEFAULT_MIN_PANE_SIZE: f32 = 32.0;

/// Default edge zone depth as a fraction of a window's width/height.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 0.25;

/// Default separator size in pixels.
pub const DEFAULT_SEPARATOR_SIZE: f32 = 2.0;

/// Default tab bar height in pixels.
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 22.0;

/// Pointer travel in pixels before a press turns into a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Centralized defaults for the docking engine.
///
/// The engine never renders, but it needs to know the geometry the renderer
/// uses (separator and tab sizes) to build hit regions that line up with what
/// is on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DockStyle {
    /// Smallest extent a pane can be dragged to, in pixels.
    pub min_pane_size: f32,
    /// Edge zone depth as a fraction (0.1-0.5) of a window's extent.
    pub edge_threshold: f32,
    /// How far outside an edge zone the pointer may be and still hit it.
    pub edge_slop: f32,
    /// Depth of the edge strips along the outer border of the whole dock.
    pub root_edge_size: f32,
    /// Half-size of the square probe used for rectangle-intersection tests.
    pub pointer_radius: f32,
    /// Width of splitter separators in pixels.
    pub separator_size: f32,
    /// Extra hit-test tolerance around the separator (pixels per side).
    pub separator_tolerance: f32,
    /// Height of the tab bar in pixels.
    pub tab_bar_height: f32,
    /// Width of a single tab in the tab bar.
    pub tab_width: f32,
    /// Pointer travel before a press becomes a drag.
    pub drag_threshold: f32,
    /// Number of snapshots kept for undo, read by `DockState::with_style`.
    pub history_limit: usize,
}

impl Default for DockStyle {
    fn default() -> Self {
        Self {
            min_pane_size: DEFAULT_MIN_PANE_SIZE,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            edge_slop: 8.0,
            root_edge_size: 16.0,
            pointer_radius: 0.0,
            separator_size: DEFAULT_SEPARATOR_SIZE,
            separator_tolerance: 4.0,
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
            tab_width: 120.0,
            drag_threshold: DRAG_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl DockStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum pane size.
    pub fn min_pane_size(mut self, size: f32) -> Self {
        self.min_pane_size = size.max(0.0);
        self
    }

    /// Set the edge zone threshold, clamped to 0.1-0.5.
    pub fn edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.clamp(0.1, 0.5);
        self
    }

    pub fn edge_slop(mut self, slop: f32) -> Self {
        self.edge_slop = slop.max(0.0);
        self
    }

    pub fn root_edge_size(mut self, size: f32) -> Self {
        self.root_edge_size = size.max(0.0);
        self
    }

    pub fn pointer_radius(mut self, radius: f32) -> Self {
        self.pointer_radius = radius.max(0.0);
        self
    }

    /// Set the separator size in pixels.
    pub fn separator_size(mut self, size: f32) -> Self {
        self.separator_size = size.max(0.0);
        self
    }

    pub fn separator_tolerance(mut self, tolerance: f32) -> Self {
        self.separator_tolerance = tolerance.max(0.0);
        self
    }

    /// Set the tab bar height.
    pub fn tab_bar_height(mut self, height: f32) -> Self {
        self.tab_bar_height = height.max(0.0);
        self
    }

    pub fn tab_width(mut self, width: f32) -> Self {
        self.tab_width = width.max(1.0);
        self
    }

    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold.max(0.0);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
