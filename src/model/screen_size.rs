//! Screen size categories and the oracle that reports them.
//!
//! The view-state core never measures anything itself. It asks a
//! [`ScreenSizeOracle`] for the current [`ScreenSizeCategory`] and compares
//! it ordinally against named categories.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Viewport width breakpoints (inclusive lower bounds, in pixels).
pub mod breakpoints {
    /// Narrowest small viewport. Anything narrower is extra small.
    pub const SM_MIN_WIDTH: u32 = 576;
    /// Narrowest medium viewport.
    pub const MD_MIN_WIDTH: u32 = 768;
    /// Narrowest large viewport.
    pub const LG_MIN_WIDTH: u32 = 992;
    /// Narrowest extra large viewport.
    pub const XL_MIN_WIDTH: u32 = 1200;
}

/// Discrete viewport size bucket, ordered by physical size ascending.
///
/// Ordering is derived from declaration order, so `Xs < Sm < Md < Lg < Xl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSizeCategory {
    /// Extra small (phones in portrait).
    Xs,
    /// Small.
    Sm,
    /// Medium.
    Md,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
}

impl ScreenSizeCategory {
    /// All categories in ascending order.
    pub const ALL: [ScreenSizeCategory; 5] = [
        ScreenSizeCategory::Xs,
        ScreenSizeCategory::Sm,
        ScreenSizeCategory::Md,
        ScreenSizeCategory::Lg,
        ScreenSizeCategory::Xl,
    ];

    /// Classify a viewport width in pixels.
    pub fn from_width(width: u32) -> Self {
        use breakpoints::*;

        if width < SM_MIN_WIDTH {
            ScreenSizeCategory::Xs
        } else if width < MD_MIN_WIDTH {
            ScreenSizeCategory::Sm
        } else if width < LG_MIN_WIDTH {
            ScreenSizeCategory::Md
        } else if width < XL_MIN_WIDTH {
            ScreenSizeCategory::Lg
        } else {
            ScreenSizeCategory::Xl
        }
    }

    /// Short lowercase name (`"xs"` .. `"xl"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenSizeCategory::Xs => "xs",
            ScreenSizeCategory::Sm => "sm",
            ScreenSizeCategory::Md => "md",
            ScreenSizeCategory::Lg => "lg",
            ScreenSizeCategory::Xl => "xl",
        }
    }
}

impl fmt::Display for ScreenSizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown screen size name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown screen size category '{0}' (expected one of xs, sm, md, lg, xl)")]
pub struct InvalidScreenSize(pub String);

impl FromStr for ScreenSizeCategory {
    type Err = InvalidScreenSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xs" => Ok(ScreenSizeCategory::Xs),
            "sm" => Ok(ScreenSizeCategory::Sm),
            "md" => Ok(ScreenSizeCategory::Md),
            "lg" => Ok(ScreenSizeCategory::Lg),
            "xl" => Ok(ScreenSizeCategory::Xl),
            _ => Err(InvalidScreenSize(s.to_string())),
        }
    }
}

// ===== Oracle =====

/// Source of truth for the current viewport size category.
///
/// Reads are synchronous and side-effect free. The category may change
/// between any two reads (viewport resize), so callers must not cache it.
pub trait ScreenSizeOracle {
    /// Current viewport size category.
    fn current(&self) -> ScreenSizeCategory;

    /// Current category equals `category`.
    fn is_equal(&self, category: ScreenSizeCategory) -> bool {
        self.current() == category
    }

    /// Current category is `category` or smaller.
    fn is_less_or_equal(&self, category: ScreenSizeCategory) -> bool {
        self.current() <= category
    }

    /// Current category is `category` or larger.
    fn is_greater_or_equal(&self, category: ScreenSizeCategory) -> bool {
        self.current() >= category
    }
}

impl<O: ScreenSizeOracle + ?Sized> ScreenSizeOracle for &O {
    fn current(&self) -> ScreenSizeCategory {
        (**self).current()
    }
}

impl<O: ScreenSizeOracle + ?Sized> ScreenSizeOracle for std::rc::Rc<O> {
    fn current(&self) -> ScreenSizeCategory {
        (**self).current()
    }
}

/// Oracle holding an explicitly set category.
///
/// `resize` takes `&self` so a shared handle can change the category while
/// a state machine holds another reference, the same way a real viewport
/// changes underneath the page.
#[derive(Debug, Clone)]
pub struct FixedScreen {
    category: Cell<ScreenSizeCategory>,
}

impl FixedScreen {
    /// Create an oracle reporting `category`.
    pub fn new(category: ScreenSizeCategory) -> Self {
        Self {
            category: Cell::new(category),
        }
    }

    /// Change the reported category.
    pub fn resize(&self, category: ScreenSizeCategory) {
        self.category.set(category);
    }
}

impl ScreenSizeOracle for FixedScreen {
    fn current(&self) -> ScreenSizeCategory {
        self.category.get()
    }
}

/// Oracle classifying a stored viewport width with [`ScreenSizeCategory::from_width`].
#[derive(Debug, Clone)]
pub struct WidthScreen {
    width: Cell<u32>,
}

impl WidthScreen {
    /// Create an oracle for a viewport of `width` pixels.
    pub fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
        }
    }

    /// Record a new viewport width.
    pub fn set_width(&self, width: u32) {
        self.width.set(width);
    }

    /// Current viewport width in pixels.
    pub fn width(&self) -> u32 {
        self.width.get()
    }
}

impl ScreenSizeOracle for WidthScreen {
    fn current(&self) -> ScreenSizeCategory {
        ScreenSizeCategory::from_width(self.width.get())
    }
}
