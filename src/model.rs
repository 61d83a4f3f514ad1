use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Which list an item belongs to. Also the active filter of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Cheering,
    Travel,
}

impl Category {
    pub fn toggle(self) -> Self {
        match self {
            Self::Cheering => Self::Travel,
            Self::Travel => Self::Cheering,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cheering => "Cheering",
            Self::Travel => "Travel",
        }
    }

    /// Placeholder shown in the empty input field.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Cheering => "Add a To Do",
            Self::Travel => "Where do you want to go",
        }
    }

    pub const ALL: [Category; 2] = [Self::Cheering, Self::Travel];
}

/// Opaque item identifier, used as the snapshot key.
///
/// Ordered by numeric value, so creation-timestamp ids iterate in creation
/// order whatever their digit count. Non-numeric ids sort after all numeric ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.millis(), other.millis()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of ids minted by [`IdGenerator`]. Foreign ids yield `None`.
    pub fn millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub category: Category,
}

/// All items, keyed by id. Iterates in ascending id order.
pub type Collection = BTreeMap<ItemId, Item>;

/// Mints creation-timestamp ids that never repeat within a session.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id for an item created at `now_millis`.
    ///
    /// Two calls within the same millisecond (or a clock that steps
    /// backwards) still get strictly increasing ids.
    pub fn next_at(&mut self, now_millis: i64) -> ItemId {
        self.last = now_millis.max(self.last + 1);
        ItemId(self.last.to_string())
    }

    pub fn next(&mut self) -> ItemId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Make sure future ids sort after everything in `items`.
    pub fn observe(&mut self, items: &Collection) {
        if let Some(max) = items.keys().filter_map(ItemId::millis).max() {
            self.last = self.last.max(max);
        }
    }
}
