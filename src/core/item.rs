//! Cutting-stock items and instances
//!
//! An `Instance` is a roll width plus the list of item types that have to be
//! cut from rolls of that width.

use rand::Rng;
use std::fmt;

/// One item type: a width and how many pieces of it are demanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub width: u32,
    pub demand: u32,
}

impl Item {
    #[must_use]
    pub const fn new(width: u32, demand: u32) -> Self {
        Self { width, demand }
    }
}

/// Error type for invalid instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    NoItems,
    ZeroRollWidth,
    /// Item `index` has width zero
    ZeroWidth { index: usize },
    /// Item `index` does not fit on an empty roll
    WiderThanRoll { index: usize, width: u32, roll_width: u32 },
    /// Unparseable input at a 1-based line number
    Parse { line: usize, message: String },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => write!(f, "Instance must contain at least one item"),
            Self::ZeroRollWidth => write!(f, "Roll width must be positive"),
            Self::ZeroWidth { index } => write!(f, "Item {index} has zero width"),
            Self::WiderThanRoll {
                index,
                width,
                roll_width,
            } => write!(
                f,
                "Item {index} (width {width}) is wider than the roll ({roll_width})"
            ),
            Self::Parse { line, message } => write!(f, "Line {line}: {message}"),
        }
    }
}

impl std::error::Error for InstanceError {}

/// A validated cutting-stock instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    roll_width: u32,
    items: Vec<Item>,
}

impl Instance {
    /// Create an instance, checking every item fits on an empty roll
    ///
    /// # Errors
    /// Returns `InstanceError` if there are no items, the roll width is zero,
    /// or some item has zero width or is wider than the roll.
    ///
    /// # Examples
    /// ```
    /// use mip_katas::core::{Instance, Item};
    ///
    /// let instance = Instance::new(100, vec![Item::new(10, 5), Item::new(20, 5)]).unwrap();
    /// assert_eq!(instance.len(), 2);
    ///
    /// assert!(Instance::new(100, vec![Item::new(120, 1)]).is_err());
    /// ```
    pub fn new(roll_width: u32, items: Vec<Item>) -> Result<Self, InstanceError> {
        if roll_width == 0 {
            return Err(InstanceError::ZeroRollWidth);
        }
        if items.is_empty() {
            return Err(InstanceError::NoItems);
        }
        for (index, item) in items.iter().enumerate() {
            if item.width == 0 {
                return Err(InstanceError::ZeroWidth { index });
            }
            if item.width > roll_width {
                return Err(InstanceError::WiderThanRoll {
                    index,
                    width: item.width,
                    roll_width,
                });
            }
        }
        Ok(Self { roll_width, items })
    }

    /// Build an instance from parallel width/demand slices
    ///
    /// # Errors
    /// Same as [`Instance::new`]; extra entries in the longer slice are ignored.
    pub fn from_parts(roll_width: u32, widths: &[u32], demands: &[u32]) -> Result<Self, InstanceError> {
        let items = widths
            .iter()
            .zip(demands)
            .map(|(&width, &demand)| Item::new(width, demand))
            .collect();
        Self::new(roll_width, items)
    }

    /// Draw a random instance
    ///
    /// Widths are uniform in `1..max_width` and demands uniform in
    /// `1..max_demand`; both maxima are clamped so the ranges are never
    /// empty and widths never exceed the roll.
    ///
    /// # Errors
    /// Returns `InstanceError` if `item_count` or `roll_width` is zero.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        item_count: usize,
        roll_width: u32,
        max_width: u32,
        max_demand: u32,
    ) -> Result<Self, InstanceError> {
        let width_cap = max_width.clamp(2, roll_width.saturating_add(1).max(2));
        let demand_cap = max_demand.max(2);
        let items = (0..item_count)
            .map(|_| Item::new(rng.random_range(1..width_cap), rng.random_range(1..demand_cap)))
            .collect();
        Self::new(roll_width, items)
    }

    #[inline]
    #[must_use]
    pub const fn roll_width(&self) -> u32 {
        self.roll_width
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a validated instance
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn widths(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().map(|item| item.width)
    }

    pub fn demands(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().map(|item| item.demand)
    }

    /// Most pieces of item `index` that fit on one roll
    #[inline]
    #[must_use]
    pub fn max_pieces(&self, index: usize) -> u32 {
        self.roll_width / self.items[index].width
    }

    /// Total demanded width, divided by the roll width
    ///
    /// A lower bound on the number of rolls of any cutting plan.
    #[must_use]
    pub fn material_bound(&self) -> f64 {
        let total: u64 = self
            .items
            .iter()
            .map(|item| u64::from(item.width) * u64::from(item.demand))
            .sum();
        total as f64 / f64::from(self.roll_width)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "roll width {}, items [", self.roll_width)?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}x{}", item.width, item.demand)?;
        }
        write!(f, "]")
    }
}
