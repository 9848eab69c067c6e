//! # Row Collapsing
//!
//! Rebuilds products with their child collections from relational rows.
//!
//! ## Cartesian Expansion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product 1 has barcodes {111, 222, 333} and attributes {color, size}   │
//! │                                                                         │
//! │  LEFT JOIN both child tables:         JoinCollapser output:            │
//! │                                                                         │
//! │  id │ barcode │ attribute             id 1                              │
//! │  ───┼─────────┼──────────             ├── barcodes   [111, 222, 333]   │
//! │   1 │ 111     │ color=red             └── attributes [color=red,       │
//! │   1 │ 111     │ size=L                                size=L]           │
//! │   1 │ 222     │ color=red                                               │
//! │   1 │ 222     │ size=L                6 rows in, 3 + 2 members out      │
//! │   1 │ 333     │ color=red                                               │
//! │   1 │ 333     │ size=L                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two styles are supported:
//!
//! - **Auxiliary** ([`merge_barcodes`], [`merge_attributes`]): parents come
//!   from one query, each child table from its own `IN (...)` query, and
//!   the child rows are grouped onto the parents. No expansion happens.
//! - **Join** ([`JoinCollapser`]): one denormalized result set, grouped by
//!   id while streaming. Members are kept as sets so the expansion above
//!   collapses back to 3 barcodes and 2 attributes.
//!
//! Member order is first-seen order, which follows the statement's
//! `ORDER BY`. Callers should still compare collections as sets.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use shelf_core::{Product, ProductAttribute, ProductBarcode, ProductId};

// =============================================================================
// Fetch Strategy
// =============================================================================

/// How multi-product reads obtain child collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One query for parents plus one per requested child table.
    #[default]
    Auxiliary,
    /// A single query joining the page of parents to the child tables.
    Join,
}

impl FetchStrategy {
    pub const fn name(self) -> &'static str {
        match self {
            FetchStrategy::Auxiliary => "auxiliary",
            FetchStrategy::Join => "join",
        }
    }

    /// Looks a strategy up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [FetchStrategy::Auxiliary, FetchStrategy::Join]
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Member Sets
// =============================================================================

/// Insertion-ordered set of collection members.
#[derive(Debug)]
struct MemberSet<T> {
    seen: HashSet<T>,
    items: Vec<T>,
}

impl<T: Clone + Eq + Hash> MemberSet<T> {
    fn new() -> Self {
        MemberSet {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn from_items(items: Vec<T>) -> Self {
        let mut set = MemberSet::new();
        set.extend(items);
        set
    }

    fn insert(&mut self, item: T) {
        if self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }

    fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.insert(item);
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.items
    }
}

// =============================================================================
// Join Style
// =============================================================================

/// One row of a joined read: the parent columns plus at most one child of
/// each kind. `None` children come from a LEFT JOIN that found no match.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub product: Product,
    pub barcode: Option<String>,
    pub attribute: Option<ProductAttribute>,
}

/// Working sets of the group currently being read.
#[derive(Debug)]
struct Group {
    product: Product,
    barcodes: MemberSet<String>,
    attributes: MemberSet<ProductAttribute>,
}

/// Streams joined rows into products.
///
/// Rows are expected in id order. A group is flushed when the id changes
/// and again on [`finish`](Self::finish). An id that shows up again after
/// its group was flushed is merged into the product already emitted, so
/// unordered input never yields the same product twice.
///
/// ## Usage
/// ```rust,ignore
/// let mut collapser =
///     JoinCollapser::new(selection.wants_barcodes(), selection.wants_attributes());
/// for row in rows {
///     collapser.push(decode_joined(&row, &selection)?);
/// }
/// let products = collapser.finish();
/// ```
#[derive(Debug)]
pub struct JoinCollapser {
    wants_barcodes: bool,
    wants_attributes: bool,
    products: Vec<Product>,
    positions: HashMap<ProductId, usize>,
    current: Option<Group>,
}

impl JoinCollapser {
    pub fn new(wants_barcodes: bool, wants_attributes: bool) -> Self {
        JoinCollapser {
            wants_barcodes,
            wants_attributes,
            products: Vec::new(),
            positions: HashMap::new(),
            current: None,
        }
    }

    /// Folds one row into the current group.
    pub fn push(&mut self, row: JoinedRow) {
        let same_group = self
            .current
            .as_ref()
            .is_some_and(|group| group.product.id == row.product.id);

        if !same_group {
            self.flush();
            self.current = Some(self.open_group(row.product));
        }

        if let Some(group) = self.current.as_mut() {
            if let Some(barcode) = row.barcode {
                group.barcodes.insert(barcode);
            }
            if let Some(attribute) = row.attribute {
                group.attributes.insert(attribute);
            }
        }
    }

    /// Flushes the last group and returns the products in first-seen order.
    pub fn finish(mut self) -> Vec<Product> {
        self.flush();
        self.products
    }

    /// Starts a group, seeded with what was already collected for the id.
    fn open_group(&mut self, product: Product) -> Group {
        let collected = self
            .positions
            .get(&product.id)
            .map(|&position| &mut self.products[position]);

        let (barcodes, attributes) = match collected {
            Some(existing) => (
                existing.barcodes.take().unwrap_or_default(),
                existing.attributes.take().unwrap_or_default(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        Group {
            product,
            barcodes: MemberSet::from_items(barcodes),
            attributes: MemberSet::from_items(attributes),
        }
    }

    fn flush(&mut self) {
        let Some(group) = self.current.take() else {
            return;
        };

        let mut product = group.product;
        product.barcodes = self.wants_barcodes.then(|| group.barcodes.into_vec());
        product.attributes = self.wants_attributes.then(|| group.attributes.into_vec());

        match self.positions.get(&product.id) {
            Some(&position) => self.products[position] = product,
            None => {
                self.positions.insert(product.id, self.products.len());
                self.products.push(product);
            }
        }
    }
}

// =============================================================================
// Auxiliary Style
// =============================================================================

fn group_by_owner<T: Clone + Eq + Hash>(
    rows: impl IntoIterator<Item = (ProductId, T)>,
) -> HashMap<ProductId, MemberSet<T>> {
    let mut groups: HashMap<ProductId, MemberSet<T>> = HashMap::new();

    for (owner, member) in rows {
        groups
            .entry(owner)
            .or_insert_with(MemberSet::new)
            .insert(member);
    }

    groups
}

/// Attaches barcode rows to their products.
///
/// Every product ends with `Some(barcodes)`, empty when it has none. Rows
/// owned by products outside `products` are ignored.
pub fn merge_barcodes(products: &mut [Product], rows: Vec<ProductBarcode>) {
    let mut groups = group_by_owner(rows.into_iter().map(|row| (row.product_id, row.barcode)));

    for product in products {
        let barcodes = groups.remove(&product.id).map(MemberSet::into_vec);
        product.barcodes = Some(barcodes.unwrap_or_default());
    }
}

/// Attaches `(owner, attribute)` rows to their products.
///
/// Same contract as [`merge_barcodes`]; attributes are deduplicated by their
/// exact `(name, value)` pair.
pub fn merge_attributes(products: &mut [Product], rows: Vec<(ProductId, ProductAttribute)>) {
    let mut groups = group_by_owner(rows);

    for product in products {
        let attributes = groups.remove(&product.id).map(MemberSet::into_vec);
        product.attributes = Some(attributes.unwrap_or_default());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
